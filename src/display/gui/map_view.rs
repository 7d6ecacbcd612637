// src/display/gui/map_view.rs
//! Map area: graticule, coloured track segments and centre marker

use crate::{
    display::{plan_segments, style::{MapStyle, Rgb}},
    map::Viewport,
    track::{BoundingCenter, Track},
};
use eframe::egui;

/// Upper bound on graticule lines per axis
const MAX_GRID_LINES: usize = 200;

pub fn to_color32(colour: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(colour.0, colour.1, colour.2)
}

pub struct MapView {
    viewport: Option<Viewport>,
    hover: Option<(f64, f64)>,
}

impl MapView {
    pub fn new() -> Self {
        Self {
            viewport: None,
            hover: None,
        }
    }

    pub fn hover_position(&self) -> Option<(f64, f64)> {
        self.hover
    }

    pub fn show(&mut self, ui: &mut egui::Ui, track: &Track, bounds: &BoundingCenter, style: &MapStyle) {
        ui.horizontal(|ui| {
            ui.label("Zoom:");
            if ui.button("➖").clicked() {
                if let Some(ref mut view) = self.viewport {
                    view.zoom_by(-1.0);
                }
            }
            if let Some(ref view) = self.viewport {
                ui.label(format!("{:.1}", view.zoom));
            }
            if ui.button("➕").clicked() {
                if let Some(ref mut view) = self.viewport {
                    view.zoom_by(1.0);
                }
            }

            ui.separator();

            if ui.button("Fit track").clicked() {
                self.viewport = None;
            }
        });

        ui.separator();

        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
        let rect = response.rect;
        let (width, height) = (rect.width() as f64, rect.height() as f64);

        let view = self
            .viewport
            .get_or_insert_with(|| Viewport::framing(bounds, width, height, style.track_padding));

        if response.dragged() {
            let delta = response.drag_delta();
            view.pan(delta.x as f64, delta.y as f64);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                view.zoom_by(scroll as f64 / 200.0);
            }
        }

        self.hover = response.hover_pos().map(|pos| {
            view.from_screen(
                (pos.x - rect.left()) as f64,
                (pos.y - rect.top()) as f64,
                width,
                height,
            )
        });

        let view = *view;
        painter.rect_filled(rect, 0.0, to_color32(style.water_colour));
        Self::render_graticule(&painter, &view, rect, style.grid_separation);
        Self::render_track(&painter, &view, rect, track, style);
        Self::render_centre(&painter, &view, rect, bounds, style);
    }

    fn screen(view: &Viewport, rect: egui::Rect, lat: f64, lon: f64) -> egui::Pos2 {
        let (x, y) = view.to_screen(lat, lon, rect.width() as f64, rect.height() as f64);
        egui::pos2(rect.left() + x as f32, rect.top() + y as f32)
    }

    fn render_graticule(painter: &egui::Painter, view: &Viewport, rect: egui::Rect, separation: f64) {
        let (w, h) = (rect.width() as f64, rect.height() as f64);
        let (north, west) = view.from_screen(0.0, 0.0, w, h);
        let (south, east) = view.from_screen(w, h, w, h);

        let stroke = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(40));
        let label_colour = egui::Color32::from_white_alpha(160);
        let font = egui::FontId::proportional(11.0);

        let first_lat = (south / separation).floor() as i64;
        let last_lat = (north / separation).ceil() as i64;
        if ((last_lat - first_lat) as usize) < MAX_GRID_LINES {
            for i in first_lat..=last_lat {
                let lat = i as f64 * separation;
                if lat.abs() > 85.0 {
                    continue;
                }
                let left = Self::screen(view, rect, lat, west);
                let right = Self::screen(view, rect, lat, east);
                painter.line_segment([left, right], stroke);
                painter.text(
                    egui::pos2(rect.right() - 4.0, left.y),
                    egui::Align2::RIGHT_BOTTOM,
                    format_degrees(lat, 'N', 'S'),
                    font.clone(),
                    label_colour,
                );
            }
        }

        let first_lon = (west / separation).floor() as i64;
        let last_lon = (east / separation).ceil() as i64;
        if ((last_lon - first_lon) as usize) < MAX_GRID_LINES {
            for i in first_lon..=last_lon {
                let lon = i as f64 * separation;
                let top = Self::screen(view, rect, north, lon);
                let bottom = Self::screen(view, rect, south, lon);
                painter.line_segment([top, bottom], stroke);
                painter.text(
                    egui::pos2(bottom.x + 2.0, rect.bottom() - 4.0),
                    egui::Align2::LEFT_BOTTOM,
                    format_degrees(lon, 'E', 'W'),
                    font.clone(),
                    label_colour,
                );
            }
        }
    }

    fn render_track(painter: &egui::Painter, view: &Viewport, rect: egui::Rect, track: &Track, style: &MapStyle) {
        for segment in plan_segments(track, style.hdop_threshold) {
            let from = Self::screen(view, rect, segment.from.latitude, segment.from.longitude);
            let to = Self::screen(view, rect, segment.to.latitude, segment.to.longitude);
            let colour = to_color32(style.colour_for(segment.quality));
            painter.line_segment([from, to], egui::Stroke::new(2.5, colour));
        }

        // a lone fix has no segment to draw
        if let [only] = track.points() {
            let pos = Self::screen(view, rect, only.latitude, only.longitude);
            let colour = to_color32(style.colour_for(crate::display::classify(
                only.hdop(),
                style.hdop_threshold,
            )));
            painter.circle_filled(pos, 4.0, colour);
        }
    }

    fn render_centre(painter: &egui::Painter, view: &Viewport, rect: egui::Rect, bounds: &BoundingCenter, style: &MapStyle) {
        let pos = Self::screen(view, rect, bounds.center_lat, bounds.center_lon);
        let stroke = egui::Stroke::new(2.0, to_color32(style.centre_colour));
        painter.line_segment([pos - egui::vec2(6.0, 0.0), pos + egui::vec2(6.0, 0.0)], stroke);
        painter.line_segment([pos - egui::vec2(0.0, 6.0), pos + egui::vec2(0.0, 6.0)], stroke);
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

fn format_degrees(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value < 0.0 { negative } else { positive };
    format!("{}°{}", value.abs(), hemisphere)
}
