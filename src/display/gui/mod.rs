// src/display/gui/mod.rs
//! GUI display module - map window for a finished track

mod app;
mod map_view;

pub use app::TrackViewerApp;

use super::{style::MapStyle, TrackRenderer};
use crate::{
    error::Result,
    track::{BoundingCenter, Track},
};

/// Opens a native window showing the track; blocks until it is closed
pub struct GuiRenderer {
    source: Option<String>,
}

impl GuiRenderer {
    pub fn new(source: Option<String>) -> Self {
        Self { source }
    }
}

impl TrackRenderer for GuiRenderer {
    fn render(&mut self, track: &Track, bounds: &BoundingCenter, style: &MapStyle) -> Result<()> {
        let options = eframe::NativeOptions {
            viewport: eframe::egui::ViewportBuilder::default()
                .with_inner_size(style.window_size)
                .with_title(style.title.clone())
                .with_min_inner_size([640.0, 480.0]),
            ..Default::default()
        };

        let app = TrackViewerApp::new(track.clone(), *bounds, style.clone(), self.source.take());

        eframe::run_native(
            "HDOP Tracker",
            options,
            Box::new(|cc| {
                cc.egui_ctx.set_visuals(eframe::egui::Visuals::dark());
                Ok(Box::new(app))
            }),
        )?;

        Ok(())
    }
}
