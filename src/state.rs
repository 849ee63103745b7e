use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;
use time::{OffsetDateTime, PrimitiveDateTime};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;
        db::migrate(&db).await?;
        Ok(Self { db, config })
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Migrated in-memory database with the test configuration.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let db = db::connect_in_memory().await?;
        Ok(Self::from_parts(db, Arc::new(AppConfig::for_tests())))
    }

    /// Wall-clock date and time in the shop's configured offset.
    pub fn now(&self) -> PrimitiveDateTime {
        let now = OffsetDateTime::now_utc().to_offset(self.config.utc_offset());
        PrimitiveDateTime::new(now.date(), now.time())
    }
}
