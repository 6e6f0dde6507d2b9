use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::{list_field::deserialize_optional_list, option_fields::OptionField},
    errors::AppError,
    utils::timestamp::now_millis,
};

// ───── API Models ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub year: String,
    pub description: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub github_link: String,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reply to an update: the identifier plus the fields that were applied.
/// Not a re-read of the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdated {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub patch: ProjectPatch,
    pub updated_at: DateTime<Utc>,
}

// ───── Store Models ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub name: String,
    pub year: String,
    pub description: String,
    pub tools: Vec<String>,
    pub github_link: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectInsert {
    pub fn into_project(self, id: String) -> Project {
        Project {
            id,
            name: self.name,
            year: self.year,
            description: self.description,
            tools: self.tools,
            github_link: self.github_link,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ───── Input & Validation ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name cannot be empty")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(
        required(message = "year is required"),
        length(min = 1, message = "year cannot be empty")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description cannot be empty")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(
        required(message = "tools is required"),
        length(min = 1, message = "tools cannot be empty")
    )]
    #[serde(
        deserialize_with = "deserialize_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tools: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl NewProjectRequest {
    pub fn new(
        name: impl Into<String>,
        year: impl Into<String>,
        description: impl Into<String>,
        tools: Vec<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            year: Some(year.into()),
            description: Some(description.into()),
            tools: Some(tools),
            ..Self::default()
        }
    }
}

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = AppError;

    fn try_from(request: NewProjectRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        let now = now_millis();

        Ok(ProjectInsert {
            name: request.name.unwrap_or_default(),
            year: request.year.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            tools: request.tools.unwrap_or_default(),
            github_link: request.github_link.unwrap_or_default(),
            featured: request.featured.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        deserialize_with = "deserialize_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tools: Option<Vec<String>>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub github_link: OptionField<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// The fields an update will actually write.
///
/// Required text fields are dropped when blank; `githubLink` is applied whenever
/// it was sent, with `null` clearing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl From<UpdateProjectRequest> for ProjectPatch {
    fn from(request: UpdateProjectRequest) -> Self {
        ProjectPatch {
            name: non_blank(request.name),
            year: non_blank(request.year),
            description: non_blank(request.description),
            tools: request.tools,
            github_link: request.github_link.into_cleared_string(),
            featured: request.featured,
        }
    }
}

impl ProjectPatch {
    /// Overwrites the fields present in the patch, retains the rest.
    pub fn apply_to(&self, project: &mut Project, updated_at: DateTime<Utc>) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(year) = &self.year {
            project.year = year.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(tools) = &self.tools {
            project.tools = tools.clone();
        }
        if let Some(github_link) = &self.github_link {
            project.github_link = github_link.clone();
        }
        if let Some(featured) = self.featured {
            project.featured = featured;
        }
        project.updated_at = updated_at;
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
