use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::{
    db::mongo::{from_bson_datetime, to_bson_datetime, MongoStore},
    entities::{
        experience::{EmploymentType, Experience, ExperienceInsert, ExperiencePatch, WorkLocation},
        list_field::deserialize_compact_list,
    },
    errors::AppError,
    repositories::mongo_repo::{MongoExperienceRepo, EXPERIENCES_COLLECTION},
};

#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;

    /// Lists every experience, newest first
    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError>;

    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<ObjectId, AppError>;

    /// Applies a patch; `NotFound` when no experience has this id
    async fn update_experience(
        &self,
        id: &ObjectId,
        patch: &ExperiencePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    async fn delete_experience(&self, id: &ObjectId) -> Result<(), AppError>;
}

#[async_trait]
impl<T> ExperienceRepository for Arc<T>
where
    T: ExperienceRepository + ?Sized,
{
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        (**self).list_experiences().await
    }

    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<ObjectId, AppError> {
        (**self).create_experience(experience).await
    }

    async fn update_experience(
        &self,
        id: &ObjectId,
        patch: &ExperiencePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        (**self).update_experience(id, patch, updated_at).await
    }

    async fn delete_experience(&self, id: &ObjectId) -> Result<(), AppError> {
        (**self).delete_experience(id).await
    }
}

// ───── Stored Document ───────────────────────────────────────────────

/// Ongoing positions are stored with `endDate: ""`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExperienceDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    role: String,
    organization: String,
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
    location: WorkLocation,
    #[serde(rename = "type")]
    kind: EmploymentType,
    #[serde(default, deserialize_with = "deserialize_compact_list")]
    achievements: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_compact_list")]
    tools: Vec<String>,
    #[serde(default)]
    featured: bool,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<&ExperienceInsert> for ExperienceDocument {
    fn from(experience: &ExperienceInsert) -> Self {
        ExperienceDocument {
            id: None,
            role: experience.role.clone(),
            organization: experience.organization.clone(),
            start_date: experience.start_date.clone(),
            end_date: Some(experience.end_date.clone().unwrap_or_default()),
            location: experience.location,
            kind: experience.kind,
            achievements: experience.achievements.clone(),
            tools: experience.tools.clone(),
            featured: experience.featured,
            created_at: to_bson_datetime(experience.created_at),
            updated_at: to_bson_datetime(experience.updated_at),
        }
    }
}

impl From<ExperienceDocument> for Experience {
    fn from(document: ExperienceDocument) -> Self {
        Experience {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            role: document.role,
            organization: document.organization,
            start_date: document.start_date,
            end_date: document.end_date.filter(|d| !d.is_empty()),
            location: document.location,
            kind: document.kind,
            achievements: document.achievements,
            tools: document.tools,
            featured: document.featured,
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
        }
    }
}

impl MongoExperienceRepo {
    pub fn new(store: MongoStore) -> Self {
        MongoExperienceRepo { store }
    }
}

#[async_trait]
impl ExperienceRepository for MongoExperienceRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        let collection = self
            .store
            .collection::<ExperienceDocument>(EXPERIENCES_COLLECTION)
            .await?;

        let documents: Vec<ExperienceDocument> = collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        tracing::debug!("Found {} experiences", documents.len());

        Ok(documents.into_iter().map(Experience::from).collect())
    }

    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<ObjectId, AppError> {
        let collection = self
            .store
            .collection::<ExperienceDocument>(EXPERIENCES_COLLECTION)
            .await?;

        let result = collection
            .insert_one(ExperienceDocument::from(experience))
            .await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::store("Inserted experience id is not an ObjectId"))
    }

    async fn update_experience(
        &self,
        id: &ObjectId,
        patch: &ExperiencePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let collection = self
            .store
            .collection::<ExperienceDocument>(EXPERIENCES_COLLECTION)
            .await?;

        let mut set = bson::to_document(patch)?;
        set.insert("updatedAt", to_bson_datetime(updated_at));

        let result = collection
            .update_one(doc! { "_id": *id }, doc! { "$set": set })
            .await?;

        if result.matched_count == 0 {
            Err(AppError::NotFound("Experience not found".into()))
        } else {
            Ok(())
        }
    }

    async fn delete_experience(&self, id: &ObjectId) -> Result<(), AppError> {
        let collection = self
            .store
            .collection::<ExperienceDocument>(EXPERIENCES_COLLECTION)
            .await?;

        let result = collection.delete_one(doc! { "_id": *id }).await?;

        if result.deleted_count == 0 {
            Err(AppError::NotFound("Experience not found".into()))
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
    fn ongoing_end_date_is_stored_blank_and_read_back_as_none() {
        let now = now_millis();
        let insert = ExperienceInsert {
            role: "Coordinator".into(),
            organization: "Institute".into(),
            start_date: "Jun 2025".into(),
            end_date: None,
            location: WorkLocation::Onsite,
            kind: EmploymentType::Leadership,
            achievements: vec![],
            tools: vec![],
            featured: false,
            created_at: now,
            updated_at: now,
        };

        let stored = bson::to_document(&ExperienceDocument::from(&insert)).unwrap();
        assert_eq!(stored.get_str("endDate").unwrap(), "");
        assert_eq!(stored.get_str("type").unwrap(), "leadership");

        let read: ExperienceDocument = bson::from_document(stored).unwrap();
        assert_eq!(Experience::from(read).end_date, None);
    }

    #[test]
    fn legacy_document_with_null_list_entries_still_reads() {
        let stored = doc! {
            "_id": ObjectId::new(),
            "role": "Advisor",
            "organization": "403 Strategists",
            "startDate": "Jun 2024",
            "endDate": "Apr 2025",
            "location": "remote",
            "type": "leadership",
            "achievements": [bson::Bson::Null],
            "tools": ["Mentoring", bson::Bson::Null],
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
        };

        let experience = Experience::from(bson::from_document::<ExperienceDocument>(stored).unwrap());
        assert!(experience.achievements.is_empty());
        assert_eq!(experience.tools, vec!["Mentoring".to_string()]);
        assert!(!experience.featured);
    }

    #[test]
    fn patch_document_uses_wire_names() {
        let patch = ExperiencePatch {
            start_date: Some("2021".into()),
            kind: Some(EmploymentType::PartTime),
            ..ExperiencePatch::default()
        };

        let set = bson::to_document(&patch).unwrap();
        assert_eq!(set.get_str("startDate").unwrap(), "2021");
        assert_eq!(set.get_str("type").unwrap(), "part-time");
    }
}
