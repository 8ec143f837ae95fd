use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use serde_json::json;

use crate::api::state::AppState;
use crate::api::visitor::Visitor;
use crate::error::AppError;

fn static_page(state: &AppState, visitor: &Visitor, template: &str) -> Result<Response, AppError> {
    state.templates.page(
        StatusCode::OK,
        template,
        &json!({ "visitor": visitor.to_context() }),
    )
}

/// GET /
pub async fn home(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
) -> Result<Response, AppError> {
    static_page(&state, &visitor, "index")
}

/// GET /about
pub async fn about(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
) -> Result<Response, AppError> {
    static_page(&state, &visitor, "about")
}

/// GET /dashboard (requires a session)
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
) -> Result<Response, AppError> {
    let Some(username) = visitor.username() else {
        return Ok(Redirect::to("/login").into_response());
    };

    state.templates.page(
        StatusCode::OK,
        "dashboard",
        &json!({ "visitor": visitor.to_context(), "username": username }),
    )
}

/// GET /gallery (requires an admin session)
pub async fn gallery(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
) -> Result<Response, AppError> {
    let Some(username) = visitor.username() else {
        return Ok(Redirect::to("/login").into_response());
    };

    if !visitor.is_admin() {
        tracing::warn!("⛔ {} tried to open the gallery", username);
        return Err(AppError::Forbidden);
    }

    static_page(&state, &visitor, "gallery")
}
