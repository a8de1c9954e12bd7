use eframe::egui;

use super::{format_time, section_status};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::AppView;

#[derive(Clone, Copy)]
enum Action {
    CheckIn,
    CheckOut,
    Upload,
    Back,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(event) = state.event.event().cloned() else {
        ui.colored_label(colors::TEXT_SECONDARY, "Open an event from a bar's page");
        return;
    };
    let mut action: Option<Action> = None;
    let mut toggle_tag: Option<i64> = None;

    ui.horizontal(|ui| {
        if ui.button("← Bars").clicked() {
            action = Some(Action::Back);
        }
        ui.heading(egui::RichText::new(&event.name).color(colors::ACCENT));
        ui.colored_label(colors::TEXT_SECONDARY, format_time(event.start_date));
    });
    if let Some(description) = &event.description {
        ui.colored_label(colors::TEXT_LIGHT, description);
    }
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let busy = state.event.is_writing();
        if state.event.is_checked_in() {
            ui.colored_label(colors::SUCCESS, "✔ You are checked in");
            if ui.add_enabled(!busy, egui::Button::new("Check out")).clicked() {
                action = Some(Action::CheckOut);
            }
        } else if ui.add_enabled(!busy, styles::primary_button("Check in")).clicked() {
            action = Some(Action::CheckIn);
        }
        if busy {
            ui.spinner();
        }
    });
    ui.add_space(12.0);

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        ui.label(egui::RichText::new("Who's here").strong().color(colors::TEXT_LIGHT));
        if section_status(ui, state.event.attendees(), "Nobody yet") {
            let attendees = state.event.attendees().data().cloned().unwrap_or_default();
            if attendees.is_empty() {
                ui.colored_label(colors::TEXT_SECONDARY, "Nobody yet");
            }
            ui.horizontal_wrapped(|ui| {
                for user in &attendees {
                    ui.colored_label(colors::TEXT_LIGHT, user.display_name());
                }
            });
        }
        ui.add_space(12.0);

        ui.label(egui::RichText::new("Post a photo").strong().color(colors::TEXT_LIGHT));
        styles::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.add(egui::TextEdit::singleline(&mut state.event.upload_path).hint_text("Path to image file"));
            ui.add(egui::TextEdit::singleline(&mut state.event.upload_description).hint_text("Description"));
            if let Some(attendees) = state.event.attendees().data() {
                if !attendees.is_empty() {
                    ui.colored_label(colors::TEXT_SECONDARY, "Tag people:");
                    ui.horizontal_wrapped(|ui| {
                        for user in attendees {
                            let mut tagged = state.event.is_tagged(user.id);
                            if ui.checkbox(&mut tagged, format!("@{}", user.handle)).changed() {
                                toggle_tag = Some(user.id);
                            }
                        }
                    });
                }
            }
            ui.horizontal(|ui| {
                let busy = state.event.is_uploading();
                if ui.add_enabled(!busy, styles::primary_button("Upload")).clicked() {
                    action = Some(Action::Upload);
                }
                if busy {
                    ui.spinner();
                }
            });
        });
        ui.add_space(12.0);

        ui.label(egui::RichText::new("Photos").strong().color(colors::TEXT_LIGHT));
        if section_status(ui, state.event.pictures(), "No photos") {
            let pictures = state.event.pictures().data().cloned().unwrap_or_default();
            if pictures.is_empty() {
                ui.colored_label(colors::TEXT_SECONDARY, "No photos yet");
            }
            for picture in &pictures {
                styles::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    if let Some(description) = &picture.description {
                        ui.colored_label(colors::TEXT_LIGHT, description);
                    }
                    if let Some(url) = &picture.image_url {
                        ui.hyperlink_to("View photo", url);
                    }
                    if !picture.tagged_users.is_empty() {
                        let tags: Vec<String> = picture.tagged_users.iter().map(|u| format!("@{}", u.handle)).collect();
                        ui.colored_label(colors::TEXT_SECONDARY, format!("with {}", tags.join(", ")));
                    }
                });
                ui.add_space(4.0);
            }
        }
    });

    if let Some(user_id) = toggle_tag {
        state.event.toggle_tag(user_id);
    }
    let api = state.api().clone();
    match action {
        Some(Action::CheckIn) => {
            let outcome = state.event.check_in(&api);
            state.handle_outcome(outcome);
        }
        Some(Action::CheckOut) => {
            let outcome = state.event.check_out(&api);
            state.handle_outcome(outcome);
        }
        Some(Action::Upload) => {
            let outcome = state.event.upload(&api);
            state.handle_outcome(outcome);
        }
        Some(Action::Back) => state.navigate(AppView::Bars),
        None => {}
    }
}
