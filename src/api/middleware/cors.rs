//! Cross-origin access.

use tower_http::cors::{Any, CorsLayer};

/// Allows any origin to call the API, so browser-based clients hosted
/// elsewhere can submit URLs.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
