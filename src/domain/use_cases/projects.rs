use crate::{
    entities::{
        api_response::DeletedResponse,
        project::{NewProjectRequest, Project, ProjectInsert, ProjectPatch, ProjectUpdated, UpdateProjectRequest},
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::{timestamp::now_millis, valid_object_id::valid_object_id},
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Retrieves all projects, newest first
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo
            .list_projects()
            .await
            .map_err(|e| e.in_context("Failed to fetch projects"))
    }

    /// Validates and stores a new project
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        let insert_project = ProjectInsert::try_from(request)?;

        let id = self.project_repo
            .create_project(&insert_project)
            .await
            .map_err(|e| e.in_context("Failed to create project"))?;

        tracing::info!(project_id = %id, "Project created");

        Ok(insert_project.into_project(id.to_hex()))
    }

    /// Applies the supplied fields to an existing project
    pub async fn update_project(
        &self,
        id: &str,
        request: UpdateProjectRequest,
    ) -> Result<ProjectUpdated, AppError> {
        let valid_id = valid_object_id(id)
            .map_err(|_| AppError::InvalidIdentifier("Invalid project ID format".to_string()))?;

        let patch = ProjectPatch::from(request);
        let updated_at = now_millis();

        self.project_repo
            .update_project(&valid_id, &patch, updated_at)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Project not found".to_string()),
                _ => e.in_context("Failed to update project"),
            })?;

        Ok(ProjectUpdated {
            id: valid_id.to_hex(),
            patch,
            updated_at,
        })
    }

    /// Permanently removes a project
    pub async fn delete_project(&self, id: &str) -> Result<DeletedResponse, AppError> {
        let valid_id = valid_object_id(id)
            .map_err(|_| AppError::InvalidIdentifier("Invalid project ID format".to_string()))?;

        self.project_repo
            .delete_project(&valid_id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Project not found".to_string()),
                _ => e.in_context("Failed to delete project"),
            })?;

        tracing::info!(project_id = %valid_id, "Project deleted");

        Ok(DeletedResponse {
            message: "Project deleted successfully".to_string(),
        })
    }
}
