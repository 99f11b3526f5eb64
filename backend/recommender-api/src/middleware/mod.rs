pub mod cors;
pub mod request_tracing;

pub use cors::cors;
pub use request_tracing::{
    correlation_id, route_label, CorrelationId, RequestTracing, CORRELATION_ID_HEADER,
};
