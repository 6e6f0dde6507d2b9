//! HTTP client for the portfolio API and the cached collection state built on it.

pub mod api;
pub mod error;
pub mod fallback;
pub mod hook;
pub mod resource;

pub use api::PortfolioClient;
pub use error::ClientError;
pub use hook::{CollectionHook, ExperiencesHook, HookState, ProjectsHook};
pub use resource::Resource;
