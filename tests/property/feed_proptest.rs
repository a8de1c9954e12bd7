//! Property-based tests for feed merging

use barhop::egui_app::feed::{filter_entries, FeedState};
use barhop::shared::models::{EntryKey, FeedEntry, PhotoPost, ReviewPost};
use barhop::shared::FeedOrdering;
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(i64::from(minute))
}

/// Same id and kind always get the same timestamp, like a real backend
fn make(id: i64, photo: bool) -> FeedEntry {
    let created_at = Some(at((id as u32 * 37) % 600 + u32::from(photo)));
    if photo {
        FeedEntry::Photo(PhotoPost {
            id,
            created_at,
            description: Some(format!("photo {}", id)),
            image_url: None,
            event_id: None,
            event_name: None,
            bar_name: Some(if id % 2 == 0 { "The Anchor" } else { "Brewdog" }.to_string()),
            tagged_users: vec![],
            assets: None,
        })
    } else {
        FeedEntry::Review(ReviewPost {
            id,
            created_at,
            event_name: None,
            beer_name: Some(if id % 3 == 0 { "Stout" } else { "Pale Ale" }.to_string()),
            text: String::new(),
            rating: None,
            bar_id: None,
            user_handle: None,
        })
    }
}

fn entries() -> impl Strategy<Value = Vec<FeedEntry>> {
    prop::collection::vec((0i64..25, any::<bool>()), 0..15)
        .prop_map(|raw| raw.into_iter().map(|(id, photo)| make(id, photo)).collect())
}

fn run(ordering: FeedOrdering, before: &[FeedEntry], page: &[FeedEntry], after: &[FeedEntry]) -> FeedState {
    let mut state = FeedState::new(ordering);
    for entry in before {
        state.merge_push(entry.clone(), at(1000));
    }
    state.merge_page(page.to_vec());
    for entry in after {
        state.merge_push(entry.clone(), at(1000));
    }
    state
}

proptest! {
    #[test]
    fn test_arrival_keeps_every_delivery(before in entries(), page in entries(), after in entries()) {
        let state = run(FeedOrdering::Arrival, &before, &page, &after);
        prop_assert_eq!(state.len(), before.len() + page.len() + after.len());
    }

    #[test]
    fn test_chronological_is_sorted_union(before in entries(), page in entries(), after in entries()) {
        let state = run(FeedOrdering::Chronological, &before, &page, &after);

        let union: HashSet<EntryKey> = before.iter().chain(&page).chain(&after).map(FeedEntry::key).collect();
        let keys: Vec<EntryKey> = state.entries().iter().map(FeedEntry::key).collect();
        let unique: HashSet<EntryKey> = keys.iter().copied().collect();
        prop_assert_eq!(keys.len(), unique.len());
        prop_assert_eq!(unique, union);

        for pair in state.entries().windows(2) {
            prop_assert!(pair[0].created_at() >= pair[1].created_at());
        }
    }

    #[test]
    fn test_chronological_ignores_delivery_order(mut all in entries(), split in 0usize..15) {
        let split = split.min(all.len());
        let page = all.split_off(split);
        let pushed_first = run(FeedOrdering::Chronological, &all, &page, &[]);
        let paged_first = run(FeedOrdering::Chronological, &[], &page, &all);
        let a: Vec<EntryKey> = pushed_first.entries().iter().map(FeedEntry::key).collect();
        let b: Vec<EntryKey> = paged_first.entries().iter().map(FeedEntry::key).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_filter_is_a_subsequence(items in entries(), needle in "(anchor|stout|ale|photo|)") {
        let state = run(FeedOrdering::Arrival, &[], &items, &[]);
        let visible = filter_entries(state.entries(), &needle);
        if needle.is_empty() {
            prop_assert_eq!(visible.len(), state.len());
        }
        let mut rest = state.entries().iter();
        for entry in visible {
            prop_assert!(entry.matches_lowercase(&needle));
            prop_assert!(rest.any(|e| std::ptr::eq(e, entry)));
        }
    }
}
