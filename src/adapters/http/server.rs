//! Lookup server (networked shape).
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/` | GET | Service description |
//! | `/health` | GET | Liveness probe, always `{"status": "ok"}` |
//! | `/tools/buscar_wikipedia` | POST | Resolve `{"busca": term}` to `{"content": summary}` |
//!
//! Lookup failures are reported as 200 content. Only malformed requests (400)
//! and panics (500) produce an `{"error": ...}` body.

use super::wire::{ErrorBody, HealthBody, LOOKUP_TOOL, ToolRequest, ToolResponse};
use crate::usecases::TermResolver;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info, warn};

/// Shared, immutable per-process state. Requests never mutate it.
#[derive(Clone)]
pub struct ServerState {
    resolver: Arc<TermResolver>,
}

pub fn router(resolver: Arc<TermResolver>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route(&format!("/tools/{}", LOOKUP_TOOL), post(lookup_tool))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(ServerState { resolver })
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    resolver: Arc<TermResolver>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(addr = %listener.local_addr()?, "lookup server listening");
    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "running",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "routes": ["GET /", "GET /health", format!("POST /tools/{}", LOOKUP_TOOL)],
    }))
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
    })
}

async fn lookup_tool(
    State(state): State<ServerState>,
    payload: Result<Json<ToolRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected lookup request");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let busca = request.busca.unwrap_or_default();
    if busca.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "parameter 'busca' is required");
    }

    let reply = match state.resolver.resolve(&busca).await {
        Ok(article) => ToolResponse::resolved(&article),
        Err(failure) => ToolResponse::failed(&failure),
    };
    (StatusCode::OK, Json(reply)).into_response()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(detail = %detail, "request handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, detail)
}
