use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::error::{ErrorResponse, Result};
use crate::handlers;
use crate::models::{HealthResponse, ModelInfoResponse, WelcomeResponse};
use crate::services::LifecycleState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "E-Commerce Recommender API",
        version = "1.0.0",
        description = "Per-user item recommendations backed by a nearest-neighbor model."
    ),
    paths(
        handlers::root::read_root,
        handlers::health::health_check,
        handlers::recommendation::get_recommendations,
        handlers::recommendation::get_model_info,
    ),
    components(schemas(
        WelcomeResponse,
        HealthResponse,
        ModelInfoResponse,
        LifecycleState,
        ErrorResponse
    ))
)]
struct ApiDoc;

pub fn doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// GET /docs
pub async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> Result<HttpResponse> {
    let body = serde_json::to_string(doc.get_ref()).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
