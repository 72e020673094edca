use serde::{Deserialize, Serialize};

/// Request body for creating a user. Missing fields decode as empty and are
/// rejected by the handler.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for updating a user. A `password` field, if sent, is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub id: i32,
}
