//! Users, friendships and login payloads

use serde::{Deserialize, Serialize};

/// A user from `GET /users` or `GET /events/:id/attendees`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, alias = "friend")]
    pub is_friend: bool,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {} (@{})", first, last, self.handle),
            (Some(first), None) => format!("{} (@{})", first, self.handle),
            _ => format!("@{}", self.handle),
        }
    }

    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [Some(&self.handle), self.first_name.as_ref(), self.last_name.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(alias = "id")]
    pub user_id: i64,
    #[serde(default)]
    pub handle: Option<String>,
}
