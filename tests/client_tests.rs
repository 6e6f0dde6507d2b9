mod test_utils;

use portfolio_api::{
    client::{fallback::sample_experiences, ClientError, ExperiencesHook, PortfolioClient, ProjectsHook},
    entities::{
        experience::{EmploymentType, NewExperienceRequest, UpdateExperienceRequest, WorkLocation},
        option_fields::OptionField,
        project::{NewProjectRequest, Project, UpdateProjectRequest},
    },
};
use test_utils::*;

fn atlas() -> NewProjectRequest {
    NewProjectRequest::new("Atlas", "2024", "Genome browser", vec!["rust".into()])
}

#[actix_rt::test]
async fn mount_loads_the_collection() {
    let app = TestApp::spawn().await;
    app.api_client()
        .create::<Project>(&atlas())
        .await
        .unwrap();

    let hook = ProjectsHook::new(app.api_client()).mount().await;

    let state = hook.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "Atlas");
}

#[actix_rt::test]
async fn add_update_delete_keep_local_state_in_sync() {
    let app = TestApp::spawn().await;
    let hook = ProjectsHook::new(app.api_client()).mount().await;
    assert!(hook.items().is_empty());

    let first = hook.add(&atlas()).await.unwrap();
    let second = hook
        .add(&NewProjectRequest::new("Beacon", "2025", "Status page", vec!["go".into()]))
        .await
        .unwrap();
    let names: Vec<_> = hook.items().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Beacon", "Atlas"]);

    let patch = UpdateProjectRequest {
        featured: Some(true),
        github_link: OptionField::SetToValue("https://github.com/example/atlas".into()),
        ..Default::default()
    };
    let updated = hook.update(&first.id, &patch).await.unwrap();
    assert_eq!(updated.patch.featured, Some(true));

    let items = hook.items();
    let atlas = items.iter().find(|p| p.id == first.id).unwrap();
    assert!(atlas.featured);
    assert_eq!(atlas.github_link, "https://github.com/example/atlas");
    assert_eq!(atlas.description, "Genome browser");
    assert_eq!(atlas.updated_at, updated.updated_at);

    hook.delete(&second.id).await.unwrap();
    let ids: Vec<_> = hook.items().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id.clone()]);

    hook.refetch().await;
    assert_eq!(hook.items().len(), 1);
}

#[actix_rt::test]
async fn rejected_write_leaves_local_state_untouched() {
    let app = TestApp::spawn().await;
    let hook = ExperiencesHook::new(app.api_client()).mount().await;

    let mut request = NewExperienceRequest::new(
        "Advisor",
        "403 Strategists",
        "Jun 2024",
        WorkLocation::Remote,
        EmploymentType::Leadership,
    );
    request.role = Some(String::new());

    let err = hook.add(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, ref message } if message == "Missing required fields"));
    assert!(hook.items().is_empty());

    let err = hook
        .update("65f1c0ffee0000000000abcd", &UpdateExperienceRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, ref message } if message == "Experience not found"));
}

#[actix_rt::test]
async fn failed_delete_propagates_and_keeps_cached_items() {
    let app = TestApp::spawn().await;
    let hook = ProjectsHook::new(app.api_client()).mount().await;
    let kept = hook.add(&atlas()).await.unwrap();

    let err = hook.delete("not-an-id").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, ref message } if message == "Invalid project ID format"));

    let err = hook.delete("65f1c0ffee0000000000abcd").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, ref message } if message == "Project not found"));

    let ids: Vec<_> = hook.items().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![kept.id]);
    assert_eq!(app.store.write_count(), 1);
}

#[actix_rt::test]
async fn store_failure_surfaces_the_server_message() {
    let app = TestApp::spawn().await;
    app.store.set_offline(true);

    let hook = ProjectsHook::new(app.api_client()).mount().await;

    assert!(!hook.loading());
    assert!(hook.items().is_empty());
    assert_eq!(hook.error().as_deref(), Some("Failed to fetch projects"));
}

#[actix_rt::test]
async fn unreachable_api_falls_back_to_bundled_experiences() {
    let client = PortfolioClient::new("http://127.0.0.1:1").unwrap();

    let hook = ExperiencesHook::new(client)
        .with_fallback(sample_experiences())
        .mount()
        .await;

    let state = hook.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch experiences"));
    assert_eq!(state.items, sample_experiences());
}

#[actix_rt::test]
async fn recovered_fetch_clears_the_error() {
    let app = TestApp::spawn().await;
    app.store.set_offline(true);
    let hook = ExperiencesHook::new(app.api_client()).mount().await;
    assert!(hook.error().is_some());

    app.store.set_offline(false);
    hook.refetch().await;

    assert_eq!(hook.error(), None);
}
