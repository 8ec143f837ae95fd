use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};
use tower_sessions::Session;
use tower_sessions_sqlx_store::SqliteStore;

use crate::db::models::User;
use crate::error::AppError;

/// Key the logged-in user is stored under in the session.
pub const SESSION_USER_KEY: &str = "user";

/// Cookie name carrying the signed session id.
pub const SESSION_COOKIE: &str = "session";

/// What a logged-in session holds. No entry means anonymous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
    pub logged_in_at: i64,
}

impl SessionData {
    /// The admin flag is copied from the stored role.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            is_admin: user.role.is_admin(),
            logged_in_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Server-side session records live in the same SQLite database as the users.
pub fn session_store(pool: &Pool<Sqlite>) -> SqliteStore {
    SqliteStore::new(pool.clone())
}

pub struct SessionRepository;

impl SessionRepository {
    pub async fn current(session: &Session) -> Result<Option<SessionData>, AppError> {
        Ok(session.get::<SessionData>(SESSION_USER_KEY).await?)
    }

    /// Log `user` in on this session. A fresh id is issued and the old record dropped.
    pub async fn start(session: &Session, user: &User) -> Result<SessionData, AppError> {
        let data = SessionData::for_user(user);

        session.cycle_id().await?;
        session.insert(SESSION_USER_KEY, data.clone()).await?;

        Ok(data)
    }

    /// Drop the session record and the cookie. Fine on an empty session.
    pub async fn end(session: &Session) -> Result<(), AppError> {
        session.flush().await?;
        Ok(())
    }
}
