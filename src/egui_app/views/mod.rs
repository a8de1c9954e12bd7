use eframe::egui;

use crate::egui_app::load::LoadState;
use crate::egui_app::notice::NoticeLevel;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::AppView;

pub mod auth_view;
pub mod bars_view;
pub mod beers_view;
pub mod event_view;
pub mod feed_view;
pub mod map_view;
pub mod users_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::ACCENT, egui::RichText::new("🍺 Barhop").size(18.0).strong());
                ui.add_space(16.0);

                for view in AppView::TABS {
                    let selected = state.current_view() == view
                        || (view == AppView::Bars && state.current_view() == AppView::Event);
                    if ui.selectable_label(selected, view.title()).clicked() && !selected {
                        state.navigate(view);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match state.session.current() {
                        Some(session) => {
                            if ui.button("Logout").clicked() {
                                state.logout();
                            }
                            let who = session.handle.map(|h| format!("@{}", h)).unwrap_or_else(|| format!("user {}", session.user_id));
                            ui.colored_label(colors::TEXT_LIGHT, who);
                        }
                        None => {
                            if ui.button("Log in").clicked() {
                                state.navigate(AppView::Auth);
                            }
                            ui.colored_label(colors::TEXT_SECONDARY, "Browsing anonymously");
                        }
                    }
                });
            });
        });
}

pub fn render_notices(ctx: &egui::Context, state: &AppState) {
    if state.notices.is_empty() {
        return;
    }
    egui::TopBottomPanel::bottom("notices")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            for notice in state.notices.iter() {
                let color = match notice.level {
                    NoticeLevel::Info => colors::SUCCESS,
                    NoticeLevel::Error => colors::ERROR,
                };
                ui.colored_label(color, &notice.text);
            }
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::main_frame())
        .show(ctx, |ui| match state.current_view() {
            AppView::Auth => auth_view::render(ui, state),
            AppView::Feed => feed_view::render(ui, state),
            AppView::Bars => bars_view::render(ui, state),
            AppView::Map => map_view::render(ui, state),
            AppView::Beers => beers_view::render(ui, state),
            AppView::Event => event_view::render(ui, state),
            AppView::Users => users_view::render(ui, state),
        });
}

/// Spinner, error line or nothing for a section; `true` when data is there
pub(crate) fn section_status<T>(ui: &mut egui::Ui, section: &LoadState<T>, empty_text: &str) -> bool {
    match section {
        LoadState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.colored_label(colors::TEXT_SECONDARY, "Loading...");
            });
            false
        }
        // Read failures are already logged; the section just shows its fallback.
        LoadState::Idle | LoadState::Errored(_) => {
            ui.colored_label(colors::TEXT_SECONDARY, empty_text);
            false
        }
        LoadState::Loaded(_) => true,
    }
}

pub(crate) fn filter_box(ui: &mut egui::Ui, text: &mut String, hint: &str) {
    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(text).hint_text(hint).desired_width(280.0));
        if !text.is_empty() && ui.small_button("✕").clicked() {
            text.clear();
        }
    });
    ui.add_space(8.0);
}

pub(crate) fn format_time(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()
}
