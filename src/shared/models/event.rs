//! Attendance and event pictures

use crate::shared::error::SharedError;
use crate::shared::models::feed::TaggedUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Body of `GET /events/:id/attendance`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Attendance {
    #[serde(default, alias = "checked_in")]
    pub attending: bool,
}

/// A picture from `GET /events/:id/event_pictures`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventPicture {
    pub id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "imageUrl", alias = "url")]
    pub image_url: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "taggedUsers")]
    pub tagged_users: Vec<TaggedUser>,
}

/// A photo about to be uploaded with `POST /events/:id/event_pictures`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventPicture {
    pub image_path: PathBuf,
    pub description: String,
    pub tagged_user_ids: Vec<i64>,
}

impl NewEventPicture {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.image_path.as_os_str().is_empty() {
            return Err(SharedError::validation("image", "Choose an image to upload"));
        }
        Ok(())
    }
}
