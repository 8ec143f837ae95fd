pub mod auth;
pub mod forms;
pub mod middleware;
pub mod pages;
pub mod state;
pub mod visitor;

pub use state::AppState;
pub use visitor::Visitor;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};

use crate::crypto::session_key;
use crate::db::{session_store, SESSION_COOKIE};

pub fn create_router(state: AppState) -> Router {
    // Cookie lives for the browser session; the record itself sits in SQLite
    let sessions = SessionManagerLayer::new(session_store(&state.db))
        .with_name(SESSION_COOKIE)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(state.config.cookie_secure)
        .with_expiry(Expiry::OnSessionEnd)
        .with_signed(session_key(&state.config.session_secret));

    Router::new()
        // Public pages
        .route("/", get(pages::home))
        .route("/about", get(pages::about))

        // Authentication
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/logout", get(auth::logout))

        // Session-gated pages
        .route("/dashboard", get(pages::dashboard))
        .route("/gallery", get(pages::gallery))

        // 403 page, inside the session layer so it can see the visitor
        .layer(axum_middleware::map_response_with_state(
            state.clone(),
            middleware::render_error_pages,
        ))
        .layer(axum_middleware::from_fn(middleware::resolve_session))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
