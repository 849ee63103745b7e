use serde::{Deserialize, Serialize};

/// Request body for member registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public part of the member returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicMember {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Returned by login and by the login check.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub name: String,
}
