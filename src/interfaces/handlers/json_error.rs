use actix_web::{http::{header, StatusCode}, HttpRequest, HttpResponse};
use futures::future::{ready, Ready};

pub fn json_error(status: StatusCode, error: &str, details: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "error": error,
        "details": details
    }))
}

/// Fallback for a resource: 405 with an `Allow` header listing `allowed`.
pub fn method_not_allowed(
    allowed: &'static [&'static str],
) -> impl Fn(HttpRequest) -> Ready<HttpResponse> + Clone + 'static {
    move |req: HttpRequest| {
        ready(
            HttpResponse::MethodNotAllowed()
                .insert_header((header::ALLOW, allowed.join(", ")))
                .json(serde_json::json!({
                    "success": false,
                    "error": format!("Method {} not allowed", req.method())
                })),
        )
    }
}
