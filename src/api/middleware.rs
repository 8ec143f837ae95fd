use axum::{
    extract::{Request, State},
    Extension,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tower_sessions::Session;

use crate::api::state::AppState;
use crate::api::visitor::Visitor;
use crate::db::SessionRepository;

/// Session middleware - resolves the session into a `Visitor` extension.
/// A store failure is logged and the request carries on as anonymous.
pub async fn resolve_session(session: Session, mut request: Request, next: Next) -> Response {
    let data = match SessionRepository::current(&session).await {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("❌ Session lookup failed, treating visitor as anonymous: {}", e);
            None
        }
    };

    request.extensions_mut().insert(Visitor::from_session(data));

    next.run(request).await
}

/// Swap any 403 for the rendered forbidden page.
/// Runs inside `resolve_session`, so the visitor is always present.
pub async fn render_error_pages(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
    response: Response,
) -> Response {
    if response.status() != StatusCode::FORBIDDEN {
        return response;
    }

    let data = json!({ "visitor": visitor.to_context() });
    match state.templates.page(StatusCode::FORBIDDEN, "403", &data) {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("❌ Failed to render forbidden page: {}", e);
            response
        }
    }
}
