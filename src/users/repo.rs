use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, PgPool,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::users::repo_types::{User, UserRow};

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) UNIQUE NOT NULL,
        password VARCHAR(100) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Failure kinds surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("database unavailable: {0}")]
    Connectivity(#[source] sqlx::Error),
    #[error("{0}")]
    Other(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::Conflict(db.message().to_string());
            }
        }
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            e @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed) => StoreError::Connectivity(e),
            other => StoreError::Other(other),
        }
    }
}

/// Data access for the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the generated id.
    async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<i32, StoreError>;
    /// All users in id order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn get_user(&self, id: i32) -> Result<User, StoreError>;
    /// Overwrite name and email, refreshing `updated_at`.
    async fn update_user(&self, id: i32, name: &str, email: &str) -> Result<(), StoreError>;
    /// Delete by id. Deleting a missing id is not an error.
    async fn delete_user(&self, id: i32) -> Result<(), StoreError>;
    /// Release held connections. Safe to call more than once.
    async fn close(&self);
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Open the pool, check the server answers, and make sure the table exists.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = connect_options(cfg)?;
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ping().await?;
        info!("database connection established");
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        debug!("users table ready");
        Ok(())
    }
}

fn connect_options(cfg: &DatabaseConfig) -> Result<PgConnectOptions, StoreError> {
    if let Some(url) = &cfg.url {
        return Ok(url.parse::<PgConnectOptions>()?);
    }
    Ok(PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.password)
        .database(&cfg.name))
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<i32, StoreError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: i32) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        Ok(row.into())
    }

    async fn update_user(&self, id: i32, name: &str, email: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $3
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_user(&self, id: i32) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
