use eframe::egui;

use super::{filter_box, format_time, section_status};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::models::BarEvent;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let mut select: Option<i64> = None;
    let mut open: Option<BarEvent> = None;

    egui::SidePanel::left("bars_list")
        .resizable(true)
        .default_width(320.0)
        .frame(egui::Frame::new().fill(colors::BG_DARK))
        .show_inside(ui, |ui| {
            ui.heading(egui::RichText::new("Bars").color(colors::TEXT_LIGHT));
            ui.add_space(8.0);
            filter_box(ui, &mut state.bars.filter_text, "Filter by name or address");

            if !section_status(ui, state.bars.bars(), "No bars to show") {
                return;
            }
            let selected_id = state.bars.selected().map(|b| b.id);
            egui::ScrollArea::vertical().id_salt("bars_scroll").show(ui, |ui| {
                for bar in state.bars.visible_bars() {
                    let frame = if Some(bar.id) == selected_id {
                        styles::selected_card_frame()
                    } else {
                        styles::card_frame()
                    };
                    let response = frame
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(&bar.name).strong());
                            if let Some(address) = &bar.address {
                                ui.colored_label(colors::TEXT_SECONDARY, address);
                            }
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        select = Some(bar.id);
                    }
                    ui.add_space(4.0);
                }
            });
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(12, 0)))
        .show_inside(ui, |ui| {
            let Some(bar) = state.bars.selected() else {
                ui.colored_label(colors::TEXT_SECONDARY, "Select a bar to see its events");
                return;
            };
            ui.heading(egui::RichText::new(&bar.name).color(colors::ACCENT));
            if let Some(description) = &bar.description {
                ui.colored_label(colors::TEXT_LIGHT, description);
            }
            ui.add_space(12.0);
            ui.label(egui::RichText::new("Events").strong().color(colors::TEXT_LIGHT));

            if !section_status(ui, state.bars.events(), "No events") {
                return;
            }
            let events = state.bars.events().data().cloned().unwrap_or_default();
            if events.is_empty() {
                ui.colored_label(colors::TEXT_SECONDARY, "No upcoming events");
            }
            for event in events {
                styles::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(&event.name).strong());
                        ui.colored_label(colors::TEXT_SECONDARY, format_time(event.start_date));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Open").clicked() {
                                open = Some(event.clone());
                            }
                        });
                    });
                    if let Some(description) = &event.description {
                        ui.colored_label(colors::TEXT_SECONDARY, description);
                    }
                });
                ui.add_space(4.0);
            }
        });

    if let Some(bar_id) = select {
        let api = state.api().clone();
        state.bars.select(&api, bar_id);
    }
    if let Some(event) = open {
        state.open_event(event);
    }
}
