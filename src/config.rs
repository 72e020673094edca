use std::fmt;

use anyhow::Context;
use serde::Deserialize;

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL. When present it wins over the discrete fields.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub demo_routes: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            host: var("DB_HOST", "localhost"),
            port: parse_var(&lookup, "DB_PORT", 5432)?,
            user: var("DB_USER", "postgres"),
            password: var("DB_PASSWORD", "postgres"),
            name: var("DB_NAME", "postgres"),
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 10)?,
        };

        Ok(Self {
            database,
            host: var("APP_HOST", "0.0.0.0"),
            port: parse_var(&lookup, "APP_PORT", 80)?,
            static_dir: var("STATIC_DIR", "static"),
            demo_routes: parse_flag(&lookup, "DEMO_ROUTES", true)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("invalid value for {key}: {raw:?}"),
    }
}
