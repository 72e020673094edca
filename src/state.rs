use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::users::repo::{PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env().context("load configuration")?);

        let users = Arc::new(
            PgUserStore::connect(&config.database)
                .await
                .context("connect to database")?,
        ) as Arc<dyn UserStore>;

        Ok(Self::from_parts(users, config))
    }

    pub fn from_parts(users: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::with_store(Arc::new(crate::users::memory::MemoryUserStore::default()))
    }

    #[cfg(test)]
    pub fn with_store(users: Arc<dyn UserStore>) -> Self {
        let config = AppConfig::from_lookup(|k| match k {
            "STATIC_DIR" => Some(env!("CARGO_MANIFEST_DIR").to_string() + "/static"),
            _ => None,
        })
        .expect("default config");
        Self::from_parts(users, Arc::new(config))
    }
}
