use std::sync::Arc;
use sqlx::{Pool, Sqlite};
use crate::config::Config;
use crate::error::AppError;
use crate::templates::Templates;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub templates: Arc<Templates>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Pool<Sqlite>, config: Arc<Config>) -> Result<Self, AppError> {
        Ok(Self {
            db,
            templates: Arc::new(Templates::new()?),
            config,
        })
    }
}
