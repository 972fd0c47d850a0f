use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Id;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_email_verified: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Name for display, falling back to the email address
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Successful login: the session credential and who it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

/// Account creation through `/auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
}
