use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        api_response::ApiResponse,
        experience::{NewExperienceRequest, UpdateExperienceRequest},
    },
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_experiences(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let experiences = state.experience_handler.list_experiences().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(experiences)))
}

#[instrument(skip(state, data))]
pub async fn create_experience(
    state: web::Data<AppState>,
    data: web::Json<NewExperienceRequest>,
) -> Result<impl Responder, AppError> {
    let experience = state.experience_handler
        .create_experience(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(experience)))
}

#[instrument(skip(state, data))]
pub async fn update_experience(
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateExperienceRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.experience_handler
        .update_experience(&experience_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(updated)))
}

#[instrument(skip(state))]
pub async fn delete_experience(
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state.experience_handler.delete_experience(&experience_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(deleted)))
}
