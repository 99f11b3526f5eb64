use actix_web::{get, HttpResponse};

use crate::models::WelcomeResponse;

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = WelcomeResponse)),
    tag = "info"
)]
#[get("/")]
pub async fn read_root() -> HttpResponse {
    HttpResponse::Ok().json(WelcomeResponse {
        message: "Welcome to the Recommender API. Access /docs for endpoints.".to_string(),
    })
}
