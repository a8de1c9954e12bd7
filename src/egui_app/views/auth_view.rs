use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();

    ui.vertical_centered(|ui| {
        let top_space = (available_rect.height() - 300.0).max(0.0) / 2.0;
        ui.add_space(top_space);

        ui.label(egui::RichText::new("🍺 Barhop").size(32.0).strong().color(colors::ACCENT));
        ui.add_space(8.0);
        ui.label(egui::RichText::new("Log in to check in, review and post photos").color(colors::TEXT_SECONDARY));
        ui.add_space(20.0);

        if let Some(ref error) = state.login_error {
            ui.label(egui::RichText::new(error).color(colors::ERROR));
            ui.add_space(10.0);
        }

        let input_width = 280.0;
        ui.add_sized(
            [input_width, 28.0],
            egui::TextEdit::singleline(&mut state.email_input).hint_text("Email"),
        );
        ui.add_space(8.0);
        let password = ui.add_sized(
            [input_width, 28.0],
            egui::TextEdit::singleline(&mut state.password_input)
                .password(true)
                .hint_text("Password"),
        );
        ui.add_space(20.0);

        let submitted = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(!state.is_logging_in(), styles::primary_button("Log in").min_size(egui::vec2(120.0, 32.0)))
            .clicked();
        if clicked || submitted {
            state.handle_login();
        }

        ui.add_space(10.0);
        if ui.button("Browse without logging in").clicked() {
            state.navigate(AppView::Bars);
        }

        if state.is_logging_in() {
            ui.add_space(15.0);
            ui.horizontal(|ui| {
                ui.add_space((available_rect.width() - 100.0).max(0.0) / 2.0);
                ui.label(egui::RichText::new("Logging in...").color(colors::TEXT_LIGHT));
                ui.spinner();
            });
        }
    });
}
