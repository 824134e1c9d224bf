// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use chat::{chat_handler, get_metrics_handler, session_handler, suggestion_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

const ADMIN_KEY_HEADER: &str = "x-admin-key";

pub fn create_router(state: SharedState) -> Router<SharedState> {
    let admin_routes = Router::new()
        .route("/metrics", get(get_metrics_handler))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/suggestions/{index}", post(suggestion_handler))
        .route("/session", get(session_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
}

async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Without a configured key every admin request is refused.
    let expected = state.admin_key.as_deref().ok_or(StatusCode::UNAUTHORIZED)?;
    match req.headers().get(ADMIN_KEY_HEADER) {
        Some(val) if val == expected => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
