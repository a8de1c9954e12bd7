//! Feed entries: the two kinds of social activity shown in the live stream
//!
//! Entries arrive from two sources, `GET /feed` pages and realtime pushes.
//! Both carry a `type` discriminator (`feed_photo` / `feed_review`). Pushes
//! may instead wrap the payload under a kind key, see [`FeedEntry::from_push`].

use crate::shared::error::SharedError;
use crate::shared::models::event::EventPicture;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PHOTO_TYPE: &str = "feed_photo";
pub const REVIEW_TYPE: &str = "feed_review";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaggedUser {
    pub id: i64,
    #[serde(default)]
    pub handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoPost {
    pub id: i64,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default, alias = "eventId")]
    pub event_id: Option<i64>,
    #[serde(default, alias = "eventName")]
    pub event_name: Option<String>,
    #[serde(default, alias = "barName")]
    pub bar_name: Option<String>,
    #[serde(default, alias = "taggedUsers")]
    pub tagged_users: Vec<TaggedUser>,
    /// Filled in by the enrichment fetch; `None` until it succeeds
    #[serde(skip)]
    pub assets: Option<Vec<EventPicture>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewPost {
    pub id: i64,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "eventName")]
    pub event_name: Option<String>,
    #[serde(default, alias = "beerName")]
    pub beer_name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default, alias = "barId")]
    pub bar_id: Option<i64>,
    #[serde(default, alias = "userHandle")]
    pub user_handle: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum FeedEntry {
    #[serde(rename = "feed_photo")]
    Photo(PhotoPost),
    #[serde(rename = "feed_review")]
    Review(ReviewPost),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Photo,
    Review,
}

/// Identity of an entry. Photo and review ids come from different tables,
/// so the kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub kind: EntryKind,
    pub id: i64,
}

impl FeedEntry {
    pub fn key(&self) -> EntryKey {
        match self {
            FeedEntry::Photo(p) => EntryKey { kind: EntryKind::Photo, id: p.id },
            FeedEntry::Review(r) => EntryKey { kind: EntryKind::Review, id: r.id },
        }
    }

    pub fn id(&self) -> i64 {
        self.key().id
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            FeedEntry::Photo(p) => p.created_at,
            FeedEntry::Review(r) => r.created_at,
        }
    }

    pub fn stamp_if_missing(&mut self, at: DateTime<Utc>) {
        let slot = match self {
            FeedEntry::Photo(p) => &mut p.created_at,
            FeedEntry::Review(r) => &mut r.created_at,
        };
        slot.get_or_insert(at);
    }

    /// Case-insensitive substring match over the entry's text fields.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        let hit = |field: Option<&String>| {
            field.map(|s| s.to_lowercase().contains(needle)).unwrap_or(false)
        };
        match self {
            FeedEntry::Photo(p) => {
                hit(p.description.as_ref())
                    || hit(p.event_name.as_ref())
                    || hit(p.bar_name.as_ref())
                    || p.tagged_users.iter().any(|u| hit(Some(&u.handle)))
            }
            FeedEntry::Review(r) => {
                hit(Some(&r.text))
                    || hit(r.event_name.as_ref())
                    || hit(r.beer_name.as_ref())
                    || hit(r.user_handle.as_ref())
            }
        }
    }

    /// Tag a realtime payload with its variant and decode it.
    ///
    /// Accepts `{"type": "feed_photo", ...}` as-is, or a payload wrapped under
    /// a kind key such as `{"feed_review": {...}}` or `{"photo": {...}}`.
    pub fn from_push(payload: Value) -> Result<FeedEntry, SharedError> {
        let Value::Object(mut map) = payload else {
            return Err(SharedError::protocol("feed payload is not an object"));
        };

        if map.get("type").and_then(Value::as_str).is_some() {
            return Ok(serde_json::from_value(Value::Object(map))?);
        }

        let wrapped = [
            (PHOTO_TYPE, PHOTO_TYPE),
            ("photo", PHOTO_TYPE),
            ("event_picture", PHOTO_TYPE),
            (REVIEW_TYPE, REVIEW_TYPE),
            ("review", REVIEW_TYPE),
        ];
        for (key, tag) in wrapped {
            if let Some(Value::Object(mut inner)) = map.remove(key) {
                inner.insert("type".to_string(), Value::String(tag.to_string()));
                return Ok(serde_json::from_value(Value::Object(inner))?);
            }
        }

        Err(SharedError::protocol("feed payload has no type discriminator"))
    }
}

/// One page of `GET /feed` after per-item decoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    pub entries: Vec<FeedEntry>,
    /// Items the server sent that could not be decoded
    pub skipped: usize,
}

impl FeedPage {
    /// Decode every item on its own; one unknown kind must not sink the
    /// rest of the page.
    pub fn decode(items: Vec<Value>) -> Self {
        let mut page = FeedPage::default();
        for item in items {
            match FeedEntry::from_push(item) {
                Ok(entry) => page.entries.push(entry),
                Err(e) => {
                    tracing::warn!("Skipping undecodable feed item: {}", e);
                    page.skipped += 1;
                }
            }
        }
        page
    }

    /// True only when the server returned no items at all
    pub fn is_exhausted(&self) -> bool {
        self.entries.is_empty() && self.skipped == 0
    }
}
