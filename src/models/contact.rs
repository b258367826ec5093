use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
    // Not returned by the submit endpoint
    #[serde(default)]
    pub read: Option<bool>,
}
