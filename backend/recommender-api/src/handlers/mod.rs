pub mod health;
pub mod recommendation;
pub mod root;

pub use health::health_check;
pub use recommendation::{get_model_info, get_recommendations};
pub use root::read_root;

use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::middleware::route_label;
use crate::openapi;

/// Register every route and extractor config on an app or scope.
///
/// Shared by `main` and the integration tests so both serve the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, req: &HttpRequest| {
        tracing::debug!(route = %route_label(req), error = %err, "Rejected path parameters");
        AppError::ValidationError(format!("Invalid path parameter: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, req: &HttpRequest| {
        tracing::debug!(route = %route_label(req), error = %err, "Rejected query parameters");
        AppError::ValidationError(format!("Invalid query parameter: {}", err)).into()
    }))
    .app_data(web::Data::new(openapi::doc()))
    .service(read_root)
    .service(health_check)
    .service(get_recommendations)
    .service(get_model_info)
    .route("/docs", web::get().to(openapi::openapi_json));
}
