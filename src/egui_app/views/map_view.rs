use eframe::egui;

use super::{filter_box, section_status};
use crate::egui_app::map::{centroid, project, MAX_ZOOM, MIN_ZOOM};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::types::AppView;

const MARKER_RADIUS: f32 = 7.0;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new("Map").color(colors::TEXT_LIGHT));
        ui.add_space(12.0);
        let zoom = state.bars.map().zoom();
        if ui.add_enabled(zoom > MIN_ZOOM, egui::Button::new("−")).clicked() {
            state.bars.map_mut().zoom_out();
        }
        ui.colored_label(colors::TEXT_SECONDARY, format!("zoom {}", zoom));
        if ui.add_enabled(zoom < MAX_ZOOM, egui::Button::new("+")).clicked() {
            state.bars.map_mut().zoom_in();
        }
    });
    ui.add_space(8.0);
    filter_box(ui, &mut state.bars.filter_text, "Filter bars");

    if !section_status(ui, state.bars.bars(), "No bars to show") {
        return;
    }

    let points = state.bars.map_points();
    let Some((center_lat, center_lon)) = centroid(&points) else {
        ui.colored_label(colors::TEXT_SECONDARY, "None of these bars has a location");
        return;
    };
    let clusters = state.bars.clusters();
    let zoom = state.bars.map().zoom();

    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
    let rect = response.rect;
    painter.rect_filled(rect, 8.0, colors::MAP_BG);

    let origin = project(center_lat, center_lon, zoom);
    let to_screen = |lat: f64, lon: f64| {
        let (x, y) = project(lat, lon, zoom);
        rect.center() + egui::vec2((x - origin.0) as f32, (y - origin.1) as f32)
    };

    let hover = response.hover_pos();
    let mut hovered_label: Option<String> = None;
    let mut clicked_bar: Option<i64> = None;

    for cluster in &clusters {
        let pos = to_screen(cluster.center.0, cluster.center.1);
        if !rect.expand(20.0).contains(pos) {
            continue;
        }
        let radius = if cluster.is_single() {
            MARKER_RADIUS
        } else {
            MARKER_RADIUS + 4.0 * (cluster.len() as f32).sqrt()
        };
        let color = if cluster.is_single() { colors::MARKER } else { colors::CLUSTER };
        painter.circle_filled(pos, radius, color);
        if !cluster.is_single() {
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                cluster.len().to_string(),
                egui::FontId::proportional(12.0),
                colors::TEXT_LIGHT,
            );
        }

        if hover.is_some_and(|h| h.distance(pos) <= radius) {
            let names: Vec<&str> = cluster.members.iter().map(|p| p.label.as_str()).collect();
            hovered_label = Some(if cluster.is_single() {
                names.join("\n")
            } else {
                format!("{} bars within {:.1} km\n{}", cluster.len(), cluster.spread_km(), names.join("\n"))
            });
            if response.clicked() && cluster.is_single() {
                clicked_bar = cluster.members.first().map(|p| p.id);
            }
        }
    }

    if let Some(label) = hovered_label {
        response.on_hover_text(label);
    }

    // Scroll to zoom
    let scroll = ui.input(|i| i.smooth_scroll_delta.y);
    if hover.is_some_and(|h| rect.contains(h)) {
        if scroll > 1.0 {
            state.bars.map_mut().zoom_in();
        } else if scroll < -1.0 {
            state.bars.map_mut().zoom_out();
        }
    }

    if let Some(bar_id) = clicked_bar {
        let api = state.api().clone();
        state.bars.select(&api, bar_id);
        state.navigate(AppView::Bars);
    }
}
