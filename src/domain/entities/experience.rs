use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::{
        list_field::{deserialize_list, deserialize_optional_list},
        option_fields::{deserialize_blank_as_none, OptionField},
        project::non_blank,
    },
    errors::{AppError, FieldError},
    utils::timestamp::now_millis,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkLocation {
    Onsite,
    Remote,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    Internship,
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Leadership,
}

impl EmploymentType {
    pub fn is_leadership(self) -> bool {
        matches!(self, EmploymentType::Leadership)
    }
}

// ───── API Models ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: String,
    pub role: String,
    pub organization: String,
    pub start_date: String,
    /// `None` while the position is ongoing.
    #[serde(
        default,
        deserialize_with = "deserialize_blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,
    pub location: WorkLocation,
    #[serde(rename = "type")]
    pub kind: EmploymentType,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Experience {
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceUpdated {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub patch: ExperiencePatch,
    pub updated_at: DateTime<Utc>,
}

// ───── Store Models ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceInsert {
    pub role: String,
    pub organization: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub location: WorkLocation,
    pub kind: EmploymentType,
    pub achievements: Vec<String>,
    pub tools: Vec<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExperienceInsert {
    pub fn into_experience(self, id: String) -> Experience {
        Experience {
            id,
            role: self.role,
            organization: self.organization,
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            kind: self.kind,
            achievements: self.achievements,
            tools: self.tools,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ───── Input & Validation ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct NewExperienceRequest {
    #[validate(
        required(message = "role is required"),
        length(min = 1, message = "role cannot be empty")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[validate(
        required(message = "organization is required"),
        length(min = 1, message = "organization cannot be empty")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[validate(
        required(message = "startDate is required"),
        length(min = 1, message = "startDate cannot be empty")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[validate(required(message = "location is required"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<WorkLocation>,

    #[validate(required(message = "type is required"))]
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EmploymentType>,

    #[serde(deserialize_with = "deserialize_list")]
    pub achievements: Vec<String>,

    #[serde(deserialize_with = "deserialize_list")]
    pub tools: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl NewExperienceRequest {
    pub fn new(
        role: impl Into<String>,
        organization: impl Into<String>,
        start_date: impl Into<String>,
        location: WorkLocation,
        kind: EmploymentType,
    ) -> Self {
        Self {
            role: Some(role.into()),
            organization: Some(organization.into()),
            start_date: Some(start_date.into()),
            location: Some(location),
            kind: Some(kind),
            ..Self::default()
        }
    }
}

impl TryFrom<NewExperienceRequest> for ExperienceInsert {
    type Error = AppError;

    fn try_from(request: NewExperienceRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        let (location, kind) = required_choices(request.location, request.kind)?;

        let now = now_millis();

        Ok(ExperienceInsert {
            role: request.role.unwrap_or_default(),
            organization: request.organization.unwrap_or_default(),
            start_date: request.start_date.unwrap_or_default(),
            end_date: non_blank(request.end_date),
            location,
            kind,
            achievements: request.achievements,
            tools: request.tools,
            featured: request.featured.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Unwraps the enum fields, reporting each missing one the way `validate()` does.
fn required_choices(
    location: Option<WorkLocation>,
    kind: Option<EmploymentType>,
) -> Result<(WorkLocation, EmploymentType), AppError> {
    match (location, kind) {
        (Some(location), Some(kind)) => Ok((location, kind)),
        (location, kind) => {
            let mut missing = Vec::new();
            if location.is_none() {
                missing.push(FieldError {
                    field: "location".to_string(),
                    message: "location is required".to_string(),
                });
            }
            if kind.is_none() {
                missing.push(FieldError {
                    field: "kind".to_string(),
                    message: "type is required".to_string(),
                });
            }
            Err(AppError::ValidationError(missing))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateExperienceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "OptionField::is_unchanged")]
    pub end_date: OptionField<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<WorkLocation>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EmploymentType>,

    #[serde(
        deserialize_with = "deserialize_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub achievements: Option<Vec<String>>,

    #[serde(
        deserialize_with = "deserialize_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tools: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// The fields an update will actually write.
///
/// `endDate` is written whenever it was sent; `""` or `null` marks the
/// position as ongoing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperiencePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<WorkLocation>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EmploymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl From<UpdateExperienceRequest> for ExperiencePatch {
    fn from(request: UpdateExperienceRequest) -> Self {
        ExperiencePatch {
            role: non_blank(request.role),
            organization: non_blank(request.organization),
            start_date: non_blank(request.start_date),
            end_date: request.end_date.into_cleared_string(),
            location: request.location,
            kind: request.kind,
            achievements: request.achievements,
            tools: request.tools,
            featured: request.featured,
        }
    }
}

impl ExperiencePatch {
    /// Overwrites the fields present in the patch, retains the rest.
    pub fn apply_to(&self, experience: &mut Experience, updated_at: DateTime<Utc>) {
        if let Some(role) = &self.role {
            experience.role = role.clone();
        }
        if let Some(organization) = &self.organization {
            experience.organization = organization.clone();
        }
        if let Some(start_date) = &self.start_date {
            experience.start_date = start_date.clone();
        }
        if let Some(end_date) = &self.end_date {
            experience.end_date = Some(end_date.clone()).filter(|d| !d.is_empty());
        }
        if let Some(location) = self.location {
            experience.location = location;
        }
        if let Some(kind) = self.kind {
            experience.kind = kind;
        }
        if let Some(achievements) = &self.achievements {
            experience.achievements = achievements.clone();
        }
        if let Some(tools) = &self.tools {
            experience.tools = tools.clone();
        }
        if let Some(featured) = self.featured {
            experience.featured = featured;
        }
        experience.updated_at = updated_at;
    }
}
