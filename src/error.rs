use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UsernameTaken(_) => StatusCode::CONFLICT,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Crypto(_)
            | AppError::Database(_)
            | AppError::Session(_)
            | AppError::Template(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show on a page. Server-side failures stay generic.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Auth(msg) => msg.clone(),
            AppError::UsernameTaken(_) => "Username already exists".to_string(),
            AppError::Forbidden => "You do not have access to this page".to_string(),
            _ => "Something went wrong".to_string(),
        }
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for AppError {
    fn from(err: handlebars::TemplateError) -> Self {
        AppError::Template(err.to_string())
    }
}

// Bare fallback page. Handlers that own a form re-render it themselves, and
// 403s are swapped for the forbidden template by the error page layer.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        }

        let body = format!(
            "<!doctype html><title>{}</title><h1>{}</h1><p>{}</p>",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error"),
            self.public_message(),
        );

        (status, Html(body)).into_response()
    }
}
