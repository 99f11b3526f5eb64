/// Recommendation API Handlers
///
/// HTTP endpoints for per-user recommendations and model metadata
use actix_web::{get, web, HttpResponse};

use crate::error::Result;
use crate::models::{ModelInfoResponse, RecommendationQuery};
use crate::services::{recommend, AppState, UserId};

/// GET /recommend/{user_id}
/// Recommendations for a registered user, truncated to `n_recommendations`
#[utoipa::path(
    get,
    path = "/recommend/{user_id}",
    params(
        ("user_id" = i64, Path, description = "External user identifier; integers beyond i64 are never registered"),
        ("n_recommendations" = Option<i64>, Query, description = "Number of items to return (default 5)")
    ),
    responses(
        (status = 200, description = "Ordered item identifiers", body = [i64]),
        (status = 404, description = "User not registered", body = crate::error::ErrorResponse),
        (status = 422, description = "Malformed path or query", body = crate::error::ErrorResponse),
        (status = 503, description = "Model not loaded", body = crate::error::ErrorResponse)
    ),
    tag = "recommendations"
)]
#[get("/recommend/{user_id}")]
pub async fn get_recommendations(
    path: web::Path<UserId>,
    query: web::Query<RecommendationQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let items = recommend(&state, path.into_inner(), query.n_recommendations)?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /model/info
/// Startup outcome and artifact metadata
#[utoipa::path(
    get,
    path = "/model/info",
    responses((status = 200, description = "Model and registry metadata", body = ModelInfoResponse)),
    tag = "recommendations"
)]
#[get("/model/info")]
pub async fn get_model_info(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(model_info(&state))
}

pub fn model_info(state: &AppState) -> ModelInfoResponse {
    let model = state.model();

    ModelInfoResponse {
        state: state.lifecycle(),
        registry_source: state.registry_source().to_string(),
        user_count: state.users().len(),
        item_count: state.items().len(),
        n_neighbors: model.map(|m| m.n_neighbors),
        metric: model.map(|m| m.metric.clone()),
        loaded_at: state.loaded_at().map(|ts| ts.to_rfc3339()),
    }
}
