use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both register and login
#[derive(Debug, Deserialize, Clone)]
pub struct AuthData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

impl AuthData {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
