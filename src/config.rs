use crate::error::AppError;

/// Shortest accepted `SESSION_SECRET`, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub session_secret: String,
    pub admin_username: String,
    pub cookie_secure: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("database_url", &self.database_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("session_secret", &"<redacted>")
            .field("admin_username", &self.admin_username)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_secret = lookup("SESSION_SECRET")
            .ok_or_else(|| AppError::Config("SESSION_SECRET must be set".to_string()))?;

        if session_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config(format!(
                "SESSION_SECRET must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://users.db".to_string()),
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?,
            session_secret,
            admin_username: lookup("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            cookie_secure: lookup("COOKIE_SECURE")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid COOKIE_SECURE: {}", e)))?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
