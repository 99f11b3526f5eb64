/// Readiness endpoint
///
/// Failure is reported in the body, never through the status code, so the
/// health check stays reachable while the service is degraded.
use actix_web::{get, web, HttpResponse};

use crate::models::HealthResponse;
use crate::services::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Operational status and model readiness", body = HealthResponse)),
    tag = "health"
)]
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(health_report(&state))
}

pub fn health_report(state: &AppState) -> HealthResponse {
    let model_loaded = state.is_model_loaded();

    HealthResponse {
        status: if model_loaded { "ok" } else { "error" }.to_string(),
        service: state.service_name().to_string(),
        model_loaded,
    }
}
