// Streamable HTTP transport: a single /mcp endpoint with header-carried
// session ids

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::session::{Routing, SessionManager};
use crate::transport::shutdown_signal;
use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const SESSION_HEADER: &str = "mcp-session-id";

/// Serve the streamable HTTP transport until a shutdown signal arrives.
pub async fn serve(addr: &str, manager: Arc<SessionManager>) -> Result<()> {
    let app = router(manager.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("http transport listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    manager.shutdown();
    Ok(())
}

pub fn router(manager: Arc<SessionManager>) -> Router {
    Router::new()
        .route("/mcp", any(handle_mcp))
        .route("/ping", any(ping))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(manager)
}

async fn ping() -> impl IntoResponse {
    Json(json!({ "message": "pong" }))
}

async fn handle_mcp(
    State(manager): State<Arc<SessionManager>>,
    method: Method,
    headers: HeaderMap,
    body: String,
) -> Response {
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok());

    if method == Method::DELETE {
        return match session_id {
            Some(id) if manager.close(id) => StatusCode::NO_CONTENT.into_response(),
            _ => protocol_violation(),
        };
    }

    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(error) => {
            tracing::error!("malformed request body: {error}");
            let response = JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error());
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    match manager.resolve(session_id, &request) {
        Routing::Existing(session) => {
            match session.server.handle(request).await {
                Some(response) => rpc_response(&response, Some(&session.id)),
                None => StatusCode::ACCEPTED.into_response(),
            }
        }
        Routing::Created(session) => {
            // The session becomes routable only when initialize succeeds
            match session.server.handle(request).await {
                Some(response) if response.is_success() => {
                    manager.activate(session.clone());
                    tracing::info!(session = %session.id, "session initialized");
                    rpc_response(&response, Some(&session.id))
                }
                Some(response) => rpc_response(&response, None),
                None => StatusCode::ACCEPTED.into_response(),
            }
        }
        Routing::Stateless => match manager.stateless_server().handle(request).await {
            Some(response) => rpc_response(&response, None),
            None => StatusCode::ACCEPTED.into_response(),
        },
        Routing::Rejected => protocol_violation(),
    }
}

fn rpc_response(body: &JsonRpcResponse, session_id: Option<&str>) -> Response {
    let mut response = (StatusCode::OK, Json(body)).into_response();
    if let Some(id) = session_id {
        if let Ok(value) = HeaderValue::from_str(id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(SESSION_HEADER), value);
        }
    }
    response
}

/// The fixed rejection envelope: requests that fit no session state get an
/// opaque internal error, never a hint about live session ids.
fn protocol_violation() -> Response {
    let body = JsonRpcResponse::error(
        Value::Null,
        JsonRpcError::internal_error("Internal server error"),
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
