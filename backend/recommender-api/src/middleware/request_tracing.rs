//! Request tracing middleware
//!
//! Reuses the caller's `x-correlation-id` header or generates a UUID v4, stores
//! it in request extensions, echoes it on the response and logs one line when
//! the request starts and one when it completes.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::time::Instant;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Correlation id attached to each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

#[derive(Clone, Default)]
pub struct RequestTracing;

impl<S, B> Transform<S, ServiceRequest> for RequestTracing
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTracingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTracingService { service }))
    }
}

pub struct RequestTracingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTracingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let route = route_label(req.request());

        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        req.extensions_mut()
            .insert(CorrelationId(correlation_id.clone()));

        tracing::info!(
            correlation_id = %correlation_id,
            method = %method,
            route = %route,
            "HTTP request started"
        );

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let status = res.status();

            if let Ok(value) = HeaderValue::from_str(&correlation_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
            }

            tracing::info!(
                correlation_id = %correlation_id,
                method = %method,
                route = %route,
                status = status.as_u16(),
                duration_ms = start.elapsed().as_millis() as u64,
                "HTTP request completed"
            );

            Ok(res)
        })
    }
}

/// Matched route pattern, so path parameters such as user ids stay out of logs.
pub fn route_label(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Correlation id of the current request, if the middleware is installed.
pub fn correlation_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<CorrelationId>().map(|id| id.0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn echo(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(correlation_id(&req).unwrap_or_default())
    }

    #[actix_web::test]
    async fn test_existing_correlation_id_is_propagated() {
        let app = test::init_service(
            App::new()
                .wrap(RequestTracing)
                .route("/echo", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/echo")
            .insert_header((CORRELATION_ID_HEADER, "abc-123"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(
            resp.headers().get(CORRELATION_ID_HEADER).unwrap(),
            "abc-123"
        );
        let body = test::read_body(resp).await;
        assert_eq!(body, "abc-123");
    }

    #[actix_web::test]
    async fn test_missing_correlation_id_is_generated() {
        let app = test::init_service(
            App::new()
                .wrap(RequestTracing)
                .route("/echo", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get().uri("/echo").to_request();
        let resp = test::call_service(&app, req).await;

        let header = resp
            .headers()
            .get(CORRELATION_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(Uuid::parse_str(&header).is_ok());
    }

    #[actix_web::test]
    async fn test_route_label_hides_path_parameters() {
        let app = test::init_service(App::new().wrap(RequestTracing).route(
            "/users/{user_id}",
            web::get().to(|req: HttpRequest| async move {
                HttpResponse::Ok().body(route_label(&req))
            }),
        ))
        .await;

        let req = test::TestRequest::get().uri("/users/4096").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "/users/{user_id}");

        let unrouted = test::TestRequest::get().uri("/nowhere").to_http_request();
        assert_eq!(route_label(&unrouted), "unmatched");
    }
}
