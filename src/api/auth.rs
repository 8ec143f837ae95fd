use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde_json::json;
use tower_sessions::Session;

use crate::api::forms::CredentialsForm;
use crate::api::state::AppState;
use crate::api::visitor::Visitor;
use crate::crypto::verify_password;
use crate::db::{Role, SessionRepository, User, UserRepository};
use crate::error::AppError;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Re-render a credentials form with the error that sent the user back to it.
fn form_page(
    state: &AppState,
    template: &str,
    visitor: &Visitor,
    username: &str,
    error: &AppError,
) -> Result<Response, AppError> {
    state.templates.page(
        error.status(),
        template,
        &json!({
            "visitor": visitor.to_context(),
            "username": username,
            "error": error.public_message(),
        }),
    )
}

/// Unknown users and wrong passwords fail the same way.
async fn authenticate(state: &AppState, form: CredentialsForm) -> Result<User, AppError> {
    let creds = form.validate()?;

    let user = UserRepository::get_by_username(&state.db, &creds.username)
        .await?
        .ok_or_else(|| AppError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&creds.password, &user.password)? {
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    Ok(user)
}

async fn create_account(state: &AppState, form: CredentialsForm) -> Result<User, AppError> {
    let creds = form.validate()?;
    let role = Role::for_new_user(&creds.username, &state.config.admin_username);

    UserRepository::create(&state.db, &creds.username, &creds.password, role).await
}

/// GET /login
pub async fn login_form(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
) -> Result<Response, AppError> {
    state.templates.page(
        StatusCode::OK,
        "login",
        &json!({ "visitor": visitor.to_context() }),
    )
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let attempted = form.username.clone().unwrap_or_default();

    let user = match authenticate(&state, form).await {
        Ok(user) => user,
        Err(e @ (AppError::Validation(_) | AppError::Auth(_))) => {
            tracing::warn!("🔒 Login failed for {:?}: {}", attempted, e);
            return form_page(&state, "login", &visitor, &attempted, &e);
        }
        Err(e) => return Err(e),
    };

    // Logging in again replaces whatever session the cookie pointed at
    let data = SessionRepository::start(&session, &user).await?;

    tracing::info!("✅ {} logged in (admin: {})", data.username, data.is_admin);

    Ok(Redirect::to("/dashboard").into_response())
}

/// GET /register
pub async fn register_form(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
) -> Result<Response, AppError> {
    state.templates.page(
        StatusCode::OK,
        "register",
        &json!({ "visitor": visitor.to_context() }),
    )
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let attempted = form.username.clone().unwrap_or_default();

    match create_account(&state, form).await {
        Ok(user) => {
            tracing::info!("👤 Registered {} (id {}, role {:?})", user.username, user.id, user.role);
            Ok(Redirect::to("/login").into_response())
        }
        Err(e @ (AppError::Validation(_) | AppError::UsernameTaken(_))) => {
            tracing::warn!("Registration rejected for {:?}: {}", attempted, e);
            form_page(&state, "register", &visitor, &attempted, &e)
        }
        Err(e) => Err(e),
    }
}

/// GET /logout
pub async fn logout(
    Extension(visitor): Extension<Visitor>,
    session: Session,
) -> Result<Response, AppError> {
    SessionRepository::end(&session).await?;

    if let Some(username) = visitor.username() {
        tracing::info!("👋 {} logged out", username);
    }

    Ok(Redirect::to("/").into_response())
}
