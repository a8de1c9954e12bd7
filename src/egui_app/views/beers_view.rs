use eframe::egui;

use super::{filter_box, format_time, section_status};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::models::{MAX_RATING, MIN_RATING};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let mut open: Option<i64> = None;
    let mut submit = false;

    egui::SidePanel::left("beers_list")
        .resizable(true)
        .default_width(320.0)
        .frame(egui::Frame::new().fill(colors::BG_DARK))
        .show_inside(ui, |ui| {
            ui.heading(egui::RichText::new("Beers").color(colors::TEXT_LIGHT));
            ui.add_space(8.0);
            filter_box(ui, &mut state.beers.filter_text, "Filter by name, brand or style");

            if !section_status(ui, state.beers.beers(), "No beers to show") {
                return;
            }
            egui::ScrollArea::vertical().id_salt("beers_scroll").show(ui, |ui| {
                for beer in state.beers.visible_beers() {
                    let response = styles::card_frame()
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(&beer.name).strong());
                            let mut meta = Vec::new();
                            if let Some(brand) = &beer.brand {
                                meta.push(brand.clone());
                            }
                            if let Some(style) = &beer.style {
                                meta.push(style.clone());
                            }
                            if let Some(abv) = beer.abv {
                                meta.push(format!("{:.1}%", abv));
                            }
                            if !meta.is_empty() {
                                ui.colored_label(colors::TEXT_SECONDARY, meta.join(" · "));
                            }
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        open = Some(beer.id);
                    }
                    ui.add_space(4.0);
                }
            });
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(12, 0)))
        .show_inside(ui, |ui| {
            if !section_status(ui, state.beers.detail(), "Select a beer to see its reviews") {
                return;
            }
            let Some(beer) = state.beers.detail().data().cloned() else {
                return;
            };

            ui.heading(egui::RichText::new(&beer.name).color(colors::ACCENT));
            if let Some(rating) = beer.average_rating {
                ui.colored_label(colors::TEXT_LIGHT, format!("Average rating {:.1} ★", rating));
            }
            if let Some(description) = &beer.description {
                ui.colored_label(colors::TEXT_LIGHT, description);
            }
            ui.add_space(12.0);

            styles::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("Write a review").strong().color(colors::TEXT_LIGHT));
                ui.add(
                    egui::TextEdit::multiline(&mut state.beers.review_text)
                        .desired_rows(3)
                        .hint_text("How was it?"),
                );
                ui.horizontal(|ui| {
                    ui.add(egui::Slider::new(&mut state.beers.review_rating, MIN_RATING..=MAX_RATING).text("rating"));
                    let busy = state.beers.is_submitting();
                    submit = ui.add_enabled(!busy, styles::primary_button("Post")).clicked();
                    if busy {
                        ui.spinner();
                    }
                });
            });
            ui.add_space(12.0);

            ui.label(egui::RichText::new("Reviews").strong().color(colors::TEXT_LIGHT));
            if beer.reviews.is_empty() {
                ui.colored_label(colors::TEXT_SECONDARY, "No reviews yet");
            }
            egui::ScrollArea::vertical().id_salt("reviews_scroll").show(ui, |ui| {
                for review in &beer.reviews {
                    styles::card_frame().show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            if let Some(handle) = &review.user_handle {
                                ui.colored_label(colors::TEXT_LIGHT, format!("@{}", handle));
                            }
                            if let Some(rating) = review.rating {
                                ui.colored_label(colors::ACCENT, format!("{:.1} ★", rating));
                            }
                            ui.colored_label(colors::TEXT_SECONDARY, format_time(review.created_at));
                        });
                        ui.colored_label(colors::TEXT_LIGHT, &review.text);
                    });
                    ui.add_space(4.0);
                }
            });
        });

    if let Some(beer_id) = open {
        let api = state.api().clone();
        state.beers.open(&api, beer_id);
    }
    if submit {
        let api = state.api().clone();
        let outcome = state.beers.submit_review(&api);
        state.handle_outcome(outcome);
    }
}
