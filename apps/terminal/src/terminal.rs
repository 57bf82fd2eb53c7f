//! Terminal renditions of the quiz page and the map widget.

use std::io::Write;

use quiz_core::{FeedbackStyle, MapRenderer, QuizView, TileSource};
use shared::domain::GeoPoint;
use tracing::warn;

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub const ANSWER_PROMPT: &str = "Your answer (:q to quit): ";
pub const NEXT_PROMPT: &str = "Press Enter for the next question (:q to quit): ";

fn emit(out: &mut impl Write, line: &str) {
    if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        warn!(error = %err, "failed to write to terminal");
    }
}

fn paint(color: bool, code: &str, text: &str) -> String {
    if color {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Prints quiz text as it changes and tracks the widget flags the input
/// loop needs to decide what the user may do next.
pub struct TerminalView<W: Write> {
    out: W,
    color: bool,
    input_enabled: bool,
    submit_busy: bool,
    submit_visible: bool,
    next_visible: bool,
    form_visible: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            input_enabled: true,
            submit_busy: false,
            submit_visible: true,
            next_visible: false,
            form_visible: true,
        }
    }

    pub fn accepts_answer(&self) -> bool {
        self.form_visible && self.input_enabled && self.submit_visible && !self.submit_busy
    }

    pub fn offers_next(&self) -> bool {
        self.next_visible
    }

    /// Prompt for whichever control is currently on screen, if any.
    pub fn prompt(&mut self) -> bool {
        let text = if self.next_visible {
            NEXT_PROMPT
        } else if self.accepts_answer() {
            ANSWER_PROMPT
        } else {
            return false;
        };
        if let Err(err) = write!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to write prompt");
        }
        true
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> QuizView for TerminalView<W> {
    fn set_question_text(&mut self, text: &str) {
        let line = paint(self.color, BOLD, text);
        emit(&mut self.out, &line);
    }

    fn set_feedback(&mut self, text: &str, style: FeedbackStyle) {
        if text.is_empty() {
            return;
        }
        let line = match style {
            FeedbackStyle::Neutral => text.to_string(),
            FeedbackStyle::Correct => paint(self.color, GREEN, &format!("✔ {text}")),
            FeedbackStyle::Incorrect => paint(self.color, RED, &format!("✘ {text}")),
        };
        emit(&mut self.out, &line);
    }

    fn set_score(&mut self, score: u32) {
        emit(&mut self.out, &format!("Score: {score}"));
    }

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {}

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_submit_busy(&mut self, busy: bool) {
        self.submit_busy = busy;
        if busy {
            emit(&mut self.out, "Checking...");
        }
    }

    fn set_submit_visible(&mut self, visible: bool) {
        self.submit_visible = visible;
    }

    fn set_next_visible(&mut self, visible: bool) {
        self.next_visible = visible;
    }

    fn set_form_visible(&mut self, visible: bool) {
        self.form_visible = visible;
    }
}

pub fn format_point(point: GeoPoint) -> String {
    let ns = if point.lat < 0.0 { 'S' } else { 'N' };
    let ew = if point.lon < 0.0 { 'W' } else { 'E' };
    format!("{:.2}°{ns} {:.2}°{ew}", point.lat.abs(), point.lon.abs())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub at: GeoPoint,
    pub label: String,
}

/// Map stand-in: narrates viewport moves and keeps every placed marker.
pub struct TerminalMap<W: Write> {
    out: W,
    color: bool,
    markers: Vec<Marker>,
}

impl<W: Write> TerminalMap<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            markers: Vec::new(),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> MapRenderer for TerminalMap<W> {
    fn init(&mut self, center: GeoPoint, zoom: u8, tiles: &TileSource) {
        let line = format!(
            "[map] {} zoom {zoom}, tiles {} ({})",
            format_point(center),
            tiles.url_template,
            tiles.attribution
        );
        emit(&mut self.out, &line);
    }

    fn fly_to(&mut self, target: GeoPoint, zoom: u8) {
        emit(
            &mut self.out,
            &format!("[map] flying to {} zoom {zoom}", format_point(target)),
        );
    }

    fn place_marker(&mut self, at: GeoPoint, popup: &str, open_popup: bool) {
        self.markers.push(Marker {
            at,
            label: popup.to_string(),
        });
        if open_popup {
            let label = paint(self.color, BOLD, popup);
            emit(&mut self.out, &format!("[map] 📍 {label}"));
        }
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
