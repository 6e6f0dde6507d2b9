use serde::{de::DeserializeOwned, Serialize};

use crate::entities::{
    experience::{Experience, ExperienceUpdated, NewExperienceRequest, UpdateExperienceRequest},
    project::{NewProjectRequest, Project, ProjectUpdated, UpdateProjectRequest},
};

/// A record type served under `/api/{COLLECTION}`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;
    const LABEL: &'static str;

    type New: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;
    type Updated: Serialize + DeserializeOwned + Clone + Send + Sync;

    fn id(&self) -> &str;
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "project";

    type New = NewProjectRequest;
    type Patch = UpdateProjectRequest;
    type Updated = ProjectUpdated;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Experience {
    const COLLECTION: &'static str = "experiences";
    const LABEL: &'static str = "experience";

    type New = NewExperienceRequest;
    type Patch = UpdateExperienceRequest;
    type Updated = ExperienceUpdated;

    fn id(&self) -> &str {
        &self.id
    }
}
