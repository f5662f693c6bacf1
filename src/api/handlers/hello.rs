//! Handler for the greeting endpoint.

use axum::Json;

use crate::api::dto::greeting::GreetingResponse;

/// `GET /api/hello`
pub async fn hello_handler() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        greeting: "hello API",
    })
}
