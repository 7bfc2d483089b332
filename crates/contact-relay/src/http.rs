use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::Method,
    response::{IntoResponse, Response},
    routing::{any, get},
};
use tower_http::trace::TraceLayer;

use crate::relay::{Relay, RelayRequest, RelayResponse, ResponseBody};

/// Path the contact wizard posts to.
pub const SUBMIT_PATH: &str = "/submitContact";

/// First `type` parameter of a raw query string. Repeated or undecodable
/// parameters never fail the request; the relay decides the status.
pub fn query_reason(query: Option<&str>) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query?).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == "type")
        .map(|(_, value)| value)
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        match self.body {
            ResponseBody::Text(text) => (self.status, text).into_response(),
            ResponseBody::Json(ack) => (self.status, Json(ack)).into_response(),
        }
    }
}

/// Every method is routed to the relay so it can answer 405 itself.
pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route(SUBMIT_PATH, any(submit_contact))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}

async fn submit_contact(
    State(relay): State<Arc<Relay>>,
    method: Method,
    RawQuery(query): RawQuery,
    body: String,
) -> RelayResponse {
    relay
        .handle(RelayRequest {
            method,
            reason: query_reason(query.as_deref()),
            body,
        })
        .await
}

async fn health() -> &'static str {
    "ok"
}
