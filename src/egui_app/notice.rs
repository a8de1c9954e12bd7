//! Transient user-visible notices for write outcomes

use std::time::{Duration, Instant};

/// How long a notice stays on screen
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    created: Instant,
}

#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::error!("{}", text);
        self.push(NoticeLevel::Error, text);
    }

    fn push(&mut self, level: NoticeLevel, text: String) {
        self.items.push(Notice {
            level,
            text,
            created: Instant::now(),
        });
    }

    /// Drop notices older than `ttl`
    pub fn expire(&mut self, now: Instant, ttl: Duration) {
        self.items.retain(|n| now.duration_since(n.created) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn has_error(&self) -> bool {
        self.items.iter().any(|n| n.level == NoticeLevel::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
