use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Welcome to the Portfolio API!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/api/projects", "/api/experiences", "/api/health"]
    }))
}
