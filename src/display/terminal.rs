// src/display/terminal.rs
//! Terminal summary of a track

use super::{plan_runs, plan_segments, style::MapStyle, HdopQuality, TrackRenderer};
use crate::{
    error::Result,
    track::{BoundingCenter, Track},
};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_header(&mut self, style: &MapStyle) -> Result<()> {
        execute!(
            self.out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            Print(style.heading()),
            Print("\n"),
            Print("=".repeat(60)),
            ResetColor,
            Print("\n")
        )?;
        Ok(())
    }

    fn render_summary_section(&mut self, track: &Track) -> Result<()> {
        execute!(
            self.out,
            SetForegroundColor(Color::Yellow),
            Print("TRACK:"),
            ResetColor,
            Print("\n"),
            Print(format!("  Fixes:     {:>12}\n", track.len()))
        )?;

        if let Some((start, end)) = track.time_span() {
            execute!(
                self.out,
                Print(format!(
                    "  Time:      {} - {} UTC\n",
                    start.format("%H:%M:%S"),
                    end.format("%H:%M:%S")
                ))
            )?;
        }

        if let Some(duration) = track.duration() {
            let total = duration.num_seconds();
            execute!(
                self.out,
                Print(format!(
                    "  Duration:  {:>4}h {:02}m {:02}s\n",
                    total / 3600,
                    (total % 3600) / 60,
                    total % 60
                ))
            )?;
        }

        execute!(self.out, Print("\n"))?;
        Ok(())
    }

    fn render_position_section(&mut self, track: &Track, bounds: &BoundingCenter) -> Result<()> {
        execute!(
            self.out,
            SetForegroundColor(Color::Cyan),
            Print("POSITION:"),
            ResetColor,
            Print("\n"),
            Print(format!(
                "  Centre:    {:>12.6}°, {:>12.6}°\n",
                bounds.center_lat, bounds.center_lon
            ))
        )?;

        if track.is_empty() {
            execute!(self.out, Print("  No valid fixes, using default centre\n\n"))?;
            return Ok(());
        }

        execute!(
            self.out,
            Print(format!(
                "  Latitude:  {:>12.6}° to {:>12.6}°\n",
                bounds.min_lat, bounds.max_lat
            )),
            Print(format!(
                "  Longitude: {:>12.6}° to {:>12.6}°\n\n",
                bounds.min_lon, bounds.max_lon
            ))
        )?;
        Ok(())
    }

    fn render_quality_section(&mut self, track: &Track, style: &MapStyle) -> Result<()> {
        execute!(
            self.out,
            SetForegroundColor(Color::Magenta),
            Print("QUALITY:"),
            ResetColor,
            Print("\n")
        )?;

        match track.hdop_stats(style.hdop_threshold) {
            Some(stats) => {
                execute!(
                    self.out,
                    Print(format!(
                        "  HDOP:      min {:.1}  mean {:.2}  max {:.1}\n",
                        stats.min, stats.mean, stats.max
                    )),
                    Print(format!(
                        "  Above {:.1}: {:>10} of {}\n",
                        style.hdop_threshold,
                        stats.above_threshold,
                        track.len()
                    ))
                )?;
                if stats.unreadable > 0 {
                    execute!(
                        self.out,
                        Print(format!("  Unreadable HDOP: {}\n", stats.unreadable))
                    )?;
                }
            }
            None => execute!(self.out, Print("  HDOP:      Unknown\n"))?,
        }

        execute!(self.out, Print("\n"))?;
        Ok(())
    }

    fn render_segment_section(&mut self, track: &Track, style: &MapStyle) -> Result<()> {
        execute!(
            self.out,
            SetForegroundColor(Color::Blue),
            Print("SEGMENTS:"),
            ResetColor,
            Print("\n")
        )?;

        let segments = plan_segments(track, style.hdop_threshold);
        if segments.is_empty() {
            execute!(self.out, Print("  Not enough fixes to draw a track\n\n"))?;
            return Ok(());
        }

        for run in plan_runs(&segments) {
            let colour = match run.quality {
                HdopQuality::Good => Color::Green,
                HdopQuality::Bad => Color::Red,
            };
            let points = run.points(track);
            let (first, last) = (&points[0], &points[points.len() - 1]);
            execute!(
                self.out,
                SetForegroundColor(colour),
                Print(format!("  {:<5}", run.quality.label().to_uppercase())),
                ResetColor,
                Print(format!(
                    " fixes {:>5} - {:<5} (log lines {} - {})\n",
                    run.start + 1,
                    run.end + 1,
                    first.fix.line,
                    last.fix.line
                ))
            )?;
        }

        execute!(self.out, Print("\n"))?;
        Ok(())
    }
}

impl<W: Write> TrackRenderer for TerminalRenderer<W> {
    fn render(&mut self, track: &Track, bounds: &BoundingCenter, style: &MapStyle) -> Result<()> {
        self.render_header(style)?;
        self.render_summary_section(track)?;
        self.render_position_section(track, bounds)?;
        self.render_quality_section(track, style)?;
        self.render_segment_section(track, style)?;
        self.out.flush()?;
        Ok(())
    }
}
