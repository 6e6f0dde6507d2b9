use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use serde::Serialize;
use validator::ValidationErrors;

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    InvalidIdentifier(String),
    NotFound(String),
    StoreError {
        message: String,
        details: Option<String>,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}: {}", MISSING_REQUIRED_FIELDS, messages)
            }
            AppError::InvalidIdentifier(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::StoreError { message, details: Some(details) } => {
                write!(f, "{}: {}", message, details)
            }
            AppError::StoreError { message, details: None } => write!(f, "{}", message),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "success": false,
                    "error": MISSING_REQUIRED_FIELDS,
                    "details": errors
                })
            }
            AppError::InvalidIdentifier(msg) | AppError::NotFound(msg) => {
                serde_json::json!({"success": false, "error": msg})
            }
            AppError::StoreError { message, details } => {
                serde_json::json!({
                    "success": false,
                    "error": message,
                    "details": details
                })
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    pub fn store(details: impl Into<String>) -> Self {
        AppError::StoreError {
            message: "Database error".to_string(),
            details: Some(details.into()),
        }
    }

    /// Replaces the headline of a store failure with the operation that failed,
    /// keeping the driver message as details. Other variants pass through.
    pub fn in_context(self, message: &str) -> Self {
        match self {
            AppError::StoreError { details, .. } => AppError::StoreError {
                message: message.to_string(),
                details,
            },
            other => other,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::store(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::store(format!("Serialization error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::store(err.to_string())
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
