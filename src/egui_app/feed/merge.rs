//! Feed merge: one ordered list built from fetched pages and live pushes
//!
//! Two policies, chosen by configuration:
//!
//! - [`FeedOrdering::Chronological`] (default): entries are unique by
//!   [`EntryKey`] and kept newest-first by `created_at`. A repeated key
//!   replaces the stored entry in place of inserting a second copy, which
//!   closes the window where a push and the first page both carry the same
//!   entry.
//! - [`FeedOrdering::Arrival`]: pushes go to the front, pages to the back,
//!   duplicates are kept. This is how the mobile and web clients behaved.
//!
//! Filtering never touches `entries`; [`FeedState::visible`] is computed on
//! demand.

use crate::shared::config::FeedOrdering;
use crate::shared::models::{EntryKey, EventPicture, FeedEntry};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct FeedState {
    entries: Vec<FeedEntry>,
    pub filter_text: String,
    ordering: FeedOrdering,
}

impl FeedState {
    pub fn new(ordering: FeedOrdering) -> Self {
        Self {
            entries: Vec::new(),
            filter_text: String::new(),
            ordering,
        }
    }

    pub fn ordering(&self) -> FeedOrdering {
        self.ordering
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merge one live push. A push without a timestamp is stamped with
    /// `received_at`, since it was just created.
    pub fn merge_push(&mut self, mut entry: FeedEntry, received_at: DateTime<Utc>) {
        entry.stamp_if_missing(received_at);
        match self.ordering {
            FeedOrdering::Arrival => self.entries.insert(0, entry),
            FeedOrdering::Chronological => self.upsert(entry),
        }
    }

    /// Merge one fetched page (initial or older)
    pub fn merge_page(&mut self, page: Vec<FeedEntry>) {
        match self.ordering {
            FeedOrdering::Arrival => self.entries.extend(page),
            FeedOrdering::Chronological => {
                for entry in page {
                    self.upsert(entry);
                }
            }
        }
    }

    fn upsert(&mut self, entry: FeedEntry) {
        let key = entry.key();
        if let Some(pos) = self.entries.iter().position(|e| e.key() == key) {
            let existing = self.entries.remove(pos);
            self.insert_sorted(carry_assets(existing, entry));
        } else {
            self.insert_sorted(entry);
        }
    }

    /// Newest first; undated entries sink to the bottom; ties broken by
    /// key, highest id first.
    fn insert_sorted(&mut self, entry: FeedEntry) {
        let rank = sort_rank(&entry);
        let pos = self.entries.partition_point(|e| sort_rank(e) > rank);
        self.entries.insert(pos, entry);
    }

    /// Attach the pictures of `event_id` to every photo from that event.
    /// Photos still missing an image take the matching picture's URL.
    pub fn attach_event_pictures(&mut self, event_id: i64, pictures: &[EventPicture]) {
        for entry in self.entries.iter_mut() {
            let FeedEntry::Photo(photo) = entry else {
                continue;
            };
            if photo.event_id != Some(event_id) {
                continue;
            }
            if photo.image_url.is_none() {
                photo.image_url = pictures
                    .iter()
                    .find(|p| p.id == photo.id)
                    .and_then(|p| p.image_url.clone());
            }
            photo.assets = Some(pictures.to_vec());
        }
    }

    /// Entries passing the current filter, in list order
    pub fn visible(&self) -> Vec<&FeedEntry> {
        filter_entries(&self.entries, &self.filter_text)
    }
}

/// Case-insensitive substring filter; an empty or blank filter passes all
pub fn filter_entries<'a>(entries: &'a [FeedEntry], filter: &str) -> Vec<&'a FeedEntry> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries.iter().filter(|e| e.matches_lowercase(&needle)).collect()
}

fn sort_rank(entry: &FeedEntry) -> (Option<DateTime<Utc>>, EntryKey) {
    (entry.created_at(), entry.key())
}

/// Keep enrichment already fetched for an entry that is being replaced
fn carry_assets(old: FeedEntry, mut new: FeedEntry) -> FeedEntry {
    if let (FeedEntry::Photo(prev), FeedEntry::Photo(next)) = (old, &mut new) {
        if next.assets.is_none() {
            next.assets = prev.assets;
        }
        if next.image_url.is_none() {
            next.image_url = prev.image_url;
        }
    }
    new
}
