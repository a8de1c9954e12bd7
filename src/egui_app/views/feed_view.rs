use eframe::egui;

use super::{filter_box, format_time};
use crate::egui_app::feed::ChannelStatus;
use crate::egui_app::load::LoadState;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::models::{FeedEntry, PhotoPost, ReviewPost};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new("Feed").color(colors::TEXT_LIGHT));
        ui.add_space(12.0);
        let (color, label) = match state.feed.channel_status() {
            Some(ChannelStatus::Connected) => (colors::STATUS_ONLINE, "● Live"),
            Some(ChannelStatus::Connecting) => (colors::WARNING, "● Connecting"),
            _ => (colors::STATUS_OFFLINE, "● Not live"),
        };
        ui.colored_label(color, label);
    });
    ui.add_space(8.0);

    filter_box(ui, state.feed.filter_mut(), "Filter by beer, bar, event, text...");

    let entries: Vec<FeedEntry> = state.feed.visible_entries().into_iter().cloned().collect();
    let total = state.feed.entries().len();
    let mut load_more = false;

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        if total == 0 && !state.feed.is_loading() {
            ui.colored_label(colors::TEXT_SECONDARY, "Nothing in your feed yet");
        }
        if entries.is_empty() && total > 0 {
            ui.colored_label(colors::TEXT_SECONDARY, "No entries match the filter");
        }

        for entry in &entries {
            styles::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                match entry {
                    FeedEntry::Photo(photo) => render_photo(ui, photo),
                    FeedEntry::Review(review) => render_review(ui, review),
                }
            });
            ui.add_space(6.0);
        }

        ui.add_space(8.0);
        if state.feed.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.colored_label(colors::TEXT_SECONDARY, "Loading...");
            });
        } else if let LoadState::Errored(_) = state.feed.page_state() {
            ui.colored_label(colors::TEXT_SECONDARY, "Could not load more entries");
            load_more = ui.button("Retry").clicked();
        } else if !state.feed.is_exhausted() && total > 0 {
            load_more = ui.button("Load more").clicked();
        }
    });

    if load_more {
        state.feed.load_more();
    }
}

fn render_photo(ui: &mut egui::Ui, photo: &PhotoPost) {
    ui.horizontal(|ui| {
        ui.colored_label(colors::ACCENT, "📷");
        let place = match (&photo.event_name, &photo.bar_name) {
            (Some(event), Some(bar)) => format!("{} at {}", event, bar),
            (Some(event), None) => event.clone(),
            (None, Some(bar)) => bar.clone(),
            (None, None) => "New photo".to_string(),
        };
        ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(place).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(colors::TEXT_SECONDARY, format_time(photo.created_at));
        });
    });
    if let Some(description) = &photo.description {
        ui.colored_label(colors::TEXT_LIGHT, description);
    }
    if let Some(url) = &photo.image_url {
        ui.hyperlink_to("View photo", url);
    }
    if let Some(assets) = &photo.assets {
        ui.colored_label(colors::TEXT_SECONDARY, format!("{} photos from this event", assets.len()));
    }
    if !photo.tagged_users.is_empty() {
        let tags: Vec<String> = photo.tagged_users.iter().map(|u| format!("@{}", u.handle)).collect();
        ui.colored_label(colors::TEXT_SECONDARY, format!("with {}", tags.join(", ")));
    }
}

fn render_review(ui: &mut egui::Ui, review: &ReviewPost) {
    ui.horizontal(|ui| {
        ui.colored_label(colors::ACCENT, "🍺");
        let title = review.beer_name.clone().unwrap_or_else(|| "A beer".to_string());
        ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(title).strong());
        if let Some(rating) = review.rating {
            ui.colored_label(colors::ACCENT, format!("{:.1} ★", rating));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(colors::TEXT_SECONDARY, format_time(review.created_at));
        });
    });
    let by = review.user_handle.as_ref().map(|h| format!("@{} ", h)).unwrap_or_default();
    if let Some(event) = &review.event_name {
        ui.colored_label(colors::TEXT_SECONDARY, format!("{}at {}", by, event));
    }
    ui.colored_label(colors::TEXT_LIGHT, &review.text);
}
