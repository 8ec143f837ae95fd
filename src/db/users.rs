use sqlx::{Pool, Sqlite};
use crate::crypto::hash_password;
use crate::db::models::{Role, User};
use crate::error::AppError;

pub struct UserRepository;

impl UserRepository {
    /// Hash the password and insert the user.
    ///
    /// Uniqueness is left to the UNIQUE constraint: a clash comes back as
    /// `AppError::UsernameTaken`, every other failure as `AppError::Database`.
    pub async fn create(
        pool: &Pool<Sqlite>,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
INSERT INTO users (username, password, role)
VALUES (?, ?, ?)
RETURNING id, username, password, role
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::UsernameTaken(username.to_string())
            }
            other => AppError::Database(other),
        })?;

        Ok(user)
    }

    pub async fn get_by_username(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role FROM users WHERE username = ?"
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::verify_password;
    use crate::db::connect_in_memory;

    async fn rows_named(pool: &Pool<Sqlite>, username: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = connect_in_memory().await.unwrap();

        let user = UserRepository::create(&pool, "alice", "pw1", Role::User).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password, "pw1");

        let found = UserRepository::get_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(verify_password("pw1", &found.password).unwrap());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let pool = connect_in_memory().await.unwrap();
        UserRepository::create(&pool, "alice", "pw1", Role::User).await.unwrap();

        assert!(UserRepository::get_by_username(&pool, "Alice").await.unwrap().is_none());
        assert!(UserRepository::get_by_username(&pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_typed_conflict() {
        let pool = connect_in_memory().await.unwrap();
        UserRepository::create(&pool, "alice", "pw1", Role::User).await.unwrap();

        let err = UserRepository::create(&pool, "alice", "other", Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken(ref name) if name == "alice"));
        assert_eq!(rows_named(&pool, "alice").await, 1);
    }

    #[tokio::test]
    async fn test_ids_increase() {
        let pool = connect_in_memory().await.unwrap();

        let a = UserRepository::create(&pool, "a", "pw", Role::User).await.unwrap();
        let b = UserRepository::create(&pool, "b", "pw", Role::Admin).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(b.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_other_failures_are_not_conflicts() {
        let pool = connect_in_memory().await.unwrap();
        sqlx::query("DROP TABLE users").execute(&pool).await.unwrap();

        let err = UserRepository::create(&pool, "alice", "pw1", Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
