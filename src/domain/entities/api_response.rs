use serde::{Deserialize, Serialize};

/// Envelope shared by every endpoint: `{success, data?, count?, error?, details?}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            count: None,
            error: None,
            details: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        ApiResponse {
            count: Some(count),
            ..ApiResponse::ok(items)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_parses_without_data() {
        let body: ApiResponse<DeletedResponse> = serde_json::from_value(serde_json::json!({
            "success": false,
            "error": "Project not found"
        }))
        .unwrap();

        assert!(body.data.is_none());
        assert_eq!(body.error.as_deref(), Some("Project not found"));
    }

    #[test]
    fn list_envelope_carries_count() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body["count"], 3);
        assert!(body.get("error").is_none());
    }
}
