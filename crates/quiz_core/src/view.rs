//! Collaborator seams: the page widgets the controller drives and the map
//! widget it animates.

use shared::domain::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackStyle {
    #[default]
    Neutral,
    Correct,
    Incorrect,
}

impl FeedbackStyle {
    pub fn for_result(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}

/// Widgets of the quiz page. The controller only sets text, visibility and
/// enabled state; it never reads back.
pub trait QuizView {
    fn set_question_text(&mut self, text: &str);
    fn set_feedback(&mut self, text: &str, style: FeedbackStyle);
    fn set_score(&mut self, score: u32);
    fn clear_input(&mut self);
    fn focus_input(&mut self);
    fn set_input_enabled(&mut self, enabled: bool);
    fn set_submit_busy(&mut self, busy: bool);
    fn set_submit_visible(&mut self, visible: bool);
    fn set_next_visible(&mut self, visible: bool);
    fn set_form_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".into(),
        }
    }
}

pub trait MapRenderer {
    /// Called exactly once per session, before any other map call.
    fn init(&mut self, center: GeoPoint, zoom: u8, tiles: &TileSource);
    fn fly_to(&mut self, target: GeoPoint, zoom: u8);
    /// `popup` is the capital name; renderers show it in bold where the
    /// medium allows.
    fn place_marker(&mut self, at: GeoPoint, popup: &str, open_popup: bool);
}
