use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod client;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, utils, web};

use handlers::system::HealthCache;
use repositories::{experience::ExperienceRepository, project::ProjectRepository};
use shared_repos::SharedRepositories;
use use_cases::{experiences::ExperienceHandler, projects::ProjectHandler};

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub experience_handler: AppExperienceHandler,
    pub health_cache: HealthCache,
}

pub type AppProjectHandler = ProjectHandler<Arc<dyn ProjectRepository>>;
pub type AppExperienceHandler = ExperienceHandler<Arc<dyn ExperienceRepository>>;

impl AppState {
    pub fn new(repos: SharedRepositories) -> Self {
        Self::from_repositories(Arc::new(repos.project_repo), Arc::new(repos.experience_repo))
    }

    /// Wires handlers over any repository implementation.
    pub fn from_repositories(
        project_repo: Arc<dyn ProjectRepository>,
        experience_repo: Arc<dyn ExperienceRepository>,
    ) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo),
            experience_handler: ExperienceHandler::new(experience_repo),
            health_cache: HealthCache::default(),
        }
    }
}
