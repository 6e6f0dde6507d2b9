mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

fn valid_experience() -> Value {
    json!({
        "role": "Backend Engineer",
        "organization": "Acme",
        "startDate": "Jan 2024",
        "location": "remote",
        "type": "full-time",
        "achievements": ["Cut p99 latency in half"],
        "tools": ["rust", "mongodb"]
    })
}

async fn create_experience(app: &TestApp, body: &Value) -> String {
    let response = app.post_json("/api/experiences", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    created["data"]["_id"].as_str().unwrap().to_string()
}

#[actix_rt::test]
async fn created_experience_is_listed_as_ongoing() {
    let app = TestApp::spawn().await;

    create_experience(&app, &valid_experience()).await;

    let listed: Value = app.get("/api/experiences").await.json().await.unwrap();
    assert_eq!(listed["success"], true);
    assert_eq!(listed["count"], 1);
    let experience = &listed["data"][0];
    assert_eq!(experience["type"], "full-time");
    assert_eq!(experience["featured"], false);
    assert!(experience.get("endDate").is_none());
}

#[actix_rt::test]
async fn partial_update_leaves_other_fields_untouched() {
    let app = TestApp::spawn().await;
    let id = create_experience(&app, &valid_experience()).await;

    let response = app
        .put_json(
            &format!("/api/experiences/{id}"),
            &json!({"endDate": "Dec 2024", "tools": "go"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["data"]["endDate"], "Dec 2024");
    assert_eq!(updated["data"]["tools"], json!(["go"]));
    assert!(updated["data"].get("role").is_none());

    let listed: Value = app.get("/api/experiences").await.json().await.unwrap();
    let experience = &listed["data"][0];
    assert_eq!(experience["role"], "Backend Engineer");
    assert_eq!(experience["organization"], "Acme");
    assert_eq!(experience["achievements"], json!(["Cut p99 latency in half"]));
    assert_eq!(experience["endDate"], "Dec 2024");
    assert_eq!(experience["tools"], json!(["go"]));
}

#[actix_rt::test]
async fn empty_end_date_marks_position_ongoing_again() {
    let app = TestApp::spawn().await;
    let mut body = valid_experience();
    body["endDate"] = json!("Jun 2024");
    let id = create_experience(&app, &body).await;

    let response = app
        .put_json(&format!("/api/experiences/{id}"), &json!({"endDate": ""}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: Value = app.get("/api/experiences").await.json().await.unwrap();
    assert!(listed["data"][0].get("endDate").is_none());
}

#[actix_rt::test]
async fn missing_type_is_rejected() {
    let app = TestApp::spawn().await;
    let mut body = valid_experience();
    body.as_object_mut().unwrap().remove("type");

    let response = app.post_json("/api/experiences", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(body["details"][0]["message"], "type is required");
    assert_eq!(app.store.write_count(), 0);
}

#[actix_rt::test]
async fn unknown_employment_type_is_a_bad_payload() {
    let app = TestApp::spawn().await;
    let mut body = valid_experience();
    body["type"] = json!("volunteer");

    let response = app.post_json("/api/experiences", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid JSON payload");
}

#[actix_rt::test]
async fn delete_removes_experience() {
    let app = TestApp::spawn().await;
    let id = create_experience(&app, &valid_experience()).await;

    let response = app.delete(&format!("/api/experiences/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "Experience deleted successfully");

    let response = app.delete(&format!("/api/experiences/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Experience not found");
}

#[actix_rt::test]
async fn invalid_experience_id_is_a_400() {
    let app = TestApp::spawn().await;

    let response = app.delete("/api/experiences/123").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid experience ID format");
}
