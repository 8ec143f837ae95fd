pub mod models;
pub mod users;
pub mod sessions;

pub use models::{Role, User};
pub use users::UserRepository;
pub use sessions::{session_store, SessionData, SessionRepository, SESSION_COOKIE};

use std::str::FromStr;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::error::AppError;

/// Open the pool, creating the database file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<Pool<Sqlite>, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Single-connection in-memory database with the schema in place.
/// The connection is never recycled, otherwise the data would vanish with it.
pub async fn connect_in_memory() -> Result<Pool<Sqlite>, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;

    initialize(&pool).await?;
    Ok(pool)
}

/// Create the user and session tables if they are missing. Safe to run on every start.
pub async fn initialize(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user'
)
        "#,
    )
    .execute(pool)
    .await?;

    session_store(pool).migrate().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        UserRepository::create(&pool, "alice", "pw1", Role::User).await.unwrap();

        initialize(&pool).await.unwrap();
        initialize(&pool).await.unwrap();

        assert!(UserRepository::get_by_username(&pool, "alice").await.unwrap().is_some());
    }
}
