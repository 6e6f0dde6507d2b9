use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::{
    db::mongo::{from_bson_datetime, to_bson_datetime, MongoStore},
    entities::{
        list_field::deserialize_compact_list,
        project::{Project, ProjectInsert, ProjectPatch},
    },
    errors::AppError,
    repositories::mongo_repo::{MongoProjectRepo, PROJECTS_COLLECTION},
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Pings the backing store
    async fn check_connection(&self) -> Result<(), AppError>;

    /// Lists every project, newest first
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Inserts one project and returns its store-assigned id
    async fn create_project(&self, project: &ProjectInsert) -> Result<ObjectId, AppError>;

    /// Applies a patch; `NotFound` when no project has this id
    async fn update_project(
        &self,
        id: &ObjectId,
        patch: &ProjectPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Hard delete; `NotFound` when no project has this id
    async fn delete_project(&self, id: &ObjectId) -> Result<(), AppError>;
}

#[async_trait]
impl<T> ProjectRepository for Arc<T>
where
    T: ProjectRepository + ?Sized,
{
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        (**self).list_projects().await
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<ObjectId, AppError> {
        (**self).create_project(project).await
    }

    async fn update_project(
        &self,
        id: &ObjectId,
        patch: &ProjectPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        (**self).update_project(id, patch, updated_at).await
    }

    async fn delete_project(&self, id: &ObjectId) -> Result<(), AppError> {
        (**self).delete_project(id).await
    }
}

// ───── Stored Document ───────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    year: String,
    description: String,
    #[serde(default, deserialize_with = "deserialize_compact_list")]
    tools: Vec<String>,
    #[serde(default)]
    github_link: String,
    #[serde(default)]
    featured: bool,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<&ProjectInsert> for ProjectDocument {
    fn from(project: &ProjectInsert) -> Self {
        ProjectDocument {
            id: None,
            name: project.name.clone(),
            year: project.year.clone(),
            description: project.description.clone(),
            tools: project.tools.clone(),
            github_link: project.github_link.clone(),
            featured: project.featured,
            created_at: to_bson_datetime(project.created_at),
            updated_at: to_bson_datetime(project.updated_at),
        }
    }
}

impl From<ProjectDocument> for Project {
    fn from(document: ProjectDocument) -> Self {
        Project {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: document.name,
            year: document.year,
            description: document.description,
            tools: document.tools,
            github_link: document.github_link,
            featured: document.featured,
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
        }
    }
}

impl MongoProjectRepo {
    pub fn new(store: MongoStore) -> Self {
        MongoProjectRepo { store }
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let collection = self.store.collection::<ProjectDocument>(PROJECTS_COLLECTION).await?;

        let documents: Vec<ProjectDocument> = collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        tracing::debug!("Found {} projects", documents.len());

        Ok(documents.into_iter().map(Project::from).collect())
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<ObjectId, AppError> {
        let collection = self.store.collection::<ProjectDocument>(PROJECTS_COLLECTION).await?;

        let result = collection
            .insert_one(ProjectDocument::from(project))
            .await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::store("Inserted project id is not an ObjectId"))
    }

    async fn update_project(
        &self,
        id: &ObjectId,
        patch: &ProjectPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let collection = self.store.collection::<ProjectDocument>(PROJECTS_COLLECTION).await?;

        let mut set = bson::to_document(patch)?;
        set.insert("updatedAt", to_bson_datetime(updated_at));

        let result = collection
            .update_one(doc! { "_id": *id }, doc! { "$set": set })
            .await?;

        if result.matched_count == 0 {
            Err(AppError::NotFound("Project not found".into()))
        } else {
            Ok(())
        }
    }

    async fn delete_project(&self, id: &ObjectId) -> Result<(), AppError> {
        let collection = self.store.collection::<ProjectDocument>(PROJECTS_COLLECTION).await?;

        let result = collection.delete_one(doc! { "_id": *id }).await?;

        if result.deleted_count == 0 {
            Err(AppError::NotFound("Project not found".into()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::timestamp::now_millis;

    #[test]
    fn patch_document_only_contains_supplied_fields() {
        let patch = ProjectPatch {
            tools: Some(vec!["rust".into()]),
            featured: Some(true),
            ..ProjectPatch::default()
        };

        let set = bson::to_document(&patch).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_bool("featured").unwrap(), true);
        assert!(set.get("githubLink").is_none());
    }

    #[test]
    fn document_round_trips_into_project() {
        let now = now_millis();
        let insert = ProjectInsert {
            name: "X".into(),
            year: "2024".into(),
            description: "d".into(),
            tools: vec!["a".into()],
            github_link: String::new(),
            featured: false,
            created_at: now,
            updated_at: now,
        };
        let id = ObjectId::new();

        let mut document = ProjectDocument::from(&insert);
        document.id = Some(id);
        let stored = bson::to_document(&document).unwrap();
        assert!(stored.get_datetime("createdAt").is_ok());

        let read: ProjectDocument = bson::from_document(stored).unwrap();
        assert_eq!(Project::from(read), insert.into_project(id.to_hex()));
    }
}
