// src/display/gui/app.rs
//! eframe::App implementation for the track viewer

use super::map_view::{to_color32, MapView};
use crate::{
    display::{style::MapStyle, HdopQuality},
    track::{BoundingCenter, Track},
};
use eframe::egui;

pub struct TrackViewerApp {
    track: Track,
    bounds: BoundingCenter,
    style: MapStyle,
    source: Option<String>,
    map: MapView,
}

impl TrackViewerApp {
    pub fn new(track: Track, bounds: BoundingCenter, style: MapStyle, source: Option<String>) -> Self {
        Self {
            track,
            bounds,
            style,
            source,
            map: MapView::new(),
        }
    }
}

impl eframe::App for TrackViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.heading(self.style.heading());
                ui.separator();
                if let Some(ref source) = self.source {
                    ui.label(source);
                    ui.separator();
                }
                ui.label(format!("{} fixes", self.track.len()));
            });
        });

        egui::TopBottomPanel::bottom("legend").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for quality in [HdopQuality::Good, HdopQuality::Bad] {
                    let colour = to_color32(self.style.colour_for(quality));
                    ui.colored_label(colour, "━━");
                    let text = match quality {
                        HdopQuality::Good => format!("HDOP ≤ {:.1}", self.style.hdop_threshold),
                        HdopQuality::Bad => format!("HDOP > {:.1}", self.style.hdop_threshold),
                    };
                    ui.label(text);
                    ui.separator();
                }

                ui.label(format!(
                    "Centre: {:.6}, {:.6}",
                    self.bounds.center_lat, self.bounds.center_lon
                ));
                if let Some((lat, lon)) = self.map.hover_position() {
                    ui.separator();
                    ui.label(format!("Cursor: {:.6}, {:.6}", lat, lon));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.map.show(ui, &self.track, &self.bounds, &self.style);
        });
    }
}
