// src/main.rs
//! HDOP Tracker - plot an aircraft GPS track coloured by HDOP

use clap::Parser;
use env_logger::{Builder, Target};
use hdop_tracker::{
    display::{self, terminal::TerminalRenderer},
    export::{ExportFormat, TrackExporter},
    gps::GroupTerminator,
    picker, HdopTracker, TrackerConfig,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plot an aircraft GPS track, highlighting high HDOP", long_about = None)]
struct Cli {
    /// NMEA GPS log (*.txt). Prompts for one when omitted
    file: Option<PathBuf>,

    /// HDOP above which a segment is shown as poor
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Sentence closing each epoch: either, gga or gst
    #[arg(long)]
    terminator: Option<GroupTerminator>,

    /// Also write the coloured track to this file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Export format (gpx, geojson, kml, csv); defaults to the file extension
    #[arg(long, requires = "export")]
    format: Option<ExportFormat>,

    /// Print a terminal summary instead of opening the map window
    #[arg(long)]
    no_gui: bool,

    /// Directory to look for logs in when no file is given
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Persist the threshold and terminator given on the command line
    #[arg(long)]
    save_config: bool,
}

fn main() -> anyhow::Result<()> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::parse();

    let mut config = TrackerConfig::load().unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        TrackerConfig::default()
    });

    if let Some(threshold) = cli.threshold {
        config.update_threshold(threshold)?;
    }
    if let Some(terminator) = cli.terminator {
        config.update_terminator(terminator);
    }

    let picked = cli.file.is_none();
    let path = match cli.file {
        Some(path) => path,
        None => {
            let dir = match cli.dir.or_else(|| config.last_directory.clone()) {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let stdin = std::io::stdin();
            match picker::pick_log_file(&dir, stdin.lock(), std::io::stdout())? {
                Some(path) => path,
                None => {
                    info!("no log selected");
                    return Ok(());
                }
            }
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let dir = parent.canonicalize().unwrap_or_else(|_| parent.to_path_buf());
        config.remember_directory(&dir);
        if picked && !cli.save_config {
            if let Err(e) = TrackerConfig::save_last_directory(&dir) {
                warn!("could not remember log directory: {}", e);
            }
        }
    }
    if cli.save_config {
        config.save()?;
        info!("configuration saved");
    }

    let tracker = HdopTracker::new(config);
    let flight = tracker.load_file(&path)?;

    if let Some(export_path) = cli.export {
        let mut exporter = match cli.format {
            Some(format) => TrackExporter::new(export_path, format),
            None => TrackExporter::for_path(export_path)?,
        };
        tracker.export(&flight, &mut exporter)?;
    }

    if !cli.no_gui && display::should_use_gui() {
        run_gui(&tracker, &flight, &path)?;
    } else {
        tracker.render(&flight, &mut TerminalRenderer::stdout())?;
    }

    Ok(())
}

#[cfg(all(unix, not(target_os = "macos"), feature = "gui"))]
fn run_gui(tracker: &HdopTracker, flight: &hdop_tracker::FlightTrack, path: &std::path::Path) -> anyhow::Result<()> {
    let mut renderer = hdop_tracker::GuiRenderer::new(Some(path.display().to_string()));
    tracker.render(flight, &mut renderer)?;
    Ok(())
}

#[cfg(not(all(unix, not(target_os = "macos"), feature = "gui")))]
fn run_gui(tracker: &HdopTracker, flight: &hdop_tracker::FlightTrack, _path: &std::path::Path) -> anyhow::Result<()> {
    tracker.render(flight, &mut TerminalRenderer::stdout())?;
    Ok(())
}
