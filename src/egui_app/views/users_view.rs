use eframe::egui;

use super::{filter_box, section_status};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(egui::RichText::new("People").color(colors::TEXT_LIGHT));
    ui.add_space(8.0);
    filter_box(ui, &mut state.users.filter_text, "Filter by name or handle");

    if !section_status(ui, state.users.users(), "No users to show") {
        return;
    }

    let mut toggle: Option<i64> = None;
    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        for user in state.users.visible_users() {
            styles::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.colored_label(colors::TEXT_LIGHT, user.display_name());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let busy = state.users.is_updating(user.id);
                        let label = if user.is_friend { "Unfriend" } else { "Add friend" };
                        if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                            toggle = Some(user.id);
                        }
                        if busy {
                            ui.spinner();
                        }
                        if user.is_friend {
                            ui.colored_label(colors::SUCCESS, "friend");
                        }
                    });
                });
            });
            ui.add_space(4.0);
        }
    });

    if let Some(user_id) = toggle {
        let api = state.api().clone();
        let outcome = state.users.toggle_friend(&api, user_id);
        state.handle_outcome(outcome);
    }
}
