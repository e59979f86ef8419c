// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, span creation and CORS configuration

pub mod cors;
pub mod tracing;

// CORS configuration
pub use self::cors::setup_cors;

// Request tracing
pub use self::tracing::{
    propagate_request_id_layer, set_request_id_layer, trace_layer, RequestSpan,
    REQUEST_ID_HEADER,
};
