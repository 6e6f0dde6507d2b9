use crate::{
    entities::{
        api_response::DeletedResponse,
        experience::{
            Experience, ExperienceInsert, ExperiencePatch, ExperienceUpdated, NewExperienceRequest,
            UpdateExperienceRequest,
        },
    },
    errors::AppError,
    repositories::experience::ExperienceRepository,
    utils::{timestamp::now_millis, valid_object_id::valid_object_id},
};

pub struct ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
}

impl<R> ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R) -> Self {
        ExperienceHandler { experience_repo }
    }

    pub async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        self.experience_repo
            .list_experiences()
            .await
            .map_err(|e| e.in_context("Failed to fetch experiences"))
    }

    pub async fn create_experience(
        &self,
        request: NewExperienceRequest,
    ) -> Result<Experience, AppError> {
        let insert_experience = ExperienceInsert::try_from(request)?;

        let id = self.experience_repo
            .create_experience(&insert_experience)
            .await
            .map_err(|e| e.in_context("Failed to create experience"))?;

        tracing::info!(experience_id = %id, "Experience created");

        Ok(insert_experience.into_experience(id.to_hex()))
    }

    pub async fn update_experience(
        &self,
        id: &str,
        request: UpdateExperienceRequest,
    ) -> Result<ExperienceUpdated, AppError> {
        let valid_id = valid_object_id(id)
            .map_err(|_| AppError::InvalidIdentifier("Invalid experience ID format".to_string()))?;

        let patch = ExperiencePatch::from(request);
        let updated_at = now_millis();

        self.experience_repo
            .update_experience(&valid_id, &patch, updated_at)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Experience not found".to_string()),
                _ => e.in_context("Failed to update experience"),
            })?;

        Ok(ExperienceUpdated {
            id: valid_id.to_hex(),
            patch,
            updated_at,
        })
    }

    pub async fn delete_experience(&self, id: &str) -> Result<DeletedResponse, AppError> {
        let valid_id = valid_object_id(id)
            .map_err(|_| AppError::InvalidIdentifier("Invalid experience ID format".to_string()))?;

        self.experience_repo
            .delete_experience(&valid_id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Experience not found".to_string()),
                _ => e.in_context("Failed to delete experience"),
            })?;

        tracing::info!(experience_id = %valid_id, "Experience deleted");

        Ok(DeletedResponse {
            message: "Experience deleted successfully".to_string(),
        })
    }
}
