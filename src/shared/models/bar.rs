//! Bars and the events they host

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bar listed by `GET /bars`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Bar {
    /// Coordinates when both are known
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Case-insensitive match on name and address
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self
                .address
                .as_ref()
                .map(|a| a.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}

/// An event hosted by a bar, from `GET /bars/:id/events`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarEvent {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bar_id: Option<i64>,
}
