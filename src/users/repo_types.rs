use serde::Serialize;
use sqlx::FromRow;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Row as read from `users`. The password column is never selected.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: PrimitiveDateTime, // TIMESTAMP, written in UTC
    pub updated_at: PrimitiveDateTime,
}

/// Public representation of a user returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            created_at: r.created_at.assume_utc(),
            updated_at: r.updated_at.assume_utc(),
        }
    }
}
