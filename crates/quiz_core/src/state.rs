use std::collections::BTreeSet;

use shared::{domain::Country, protocol::QuestionRequest};

use crate::error::TransportError;

/// Where the controller sits in the question cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Start,
    LoadingQuestion,
    QuestionActive,
    Submitting,
    ResultShown,
    SubmitFailed,
    /// The question fetch failed; only a fresh session recovers.
    LoadFailed,
    GameOver,
}

impl GamePhase {
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::QuestionActive | Self::SubmitFailed)
    }

    /// The first question comes from `GameController::start`, never from here.
    pub fn accepts_next(self) -> bool {
        matches!(self, Self::ResultShown)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::LoadFailed)
    }
}

/// Session state. Lives as long as the controller that owns it.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    current_country: Option<Country>,
    score: u32,
    asked_countries: BTreeSet<Country>,
    is_loading: bool,
    game_over: bool,
}

impl GameState {
    pub fn current_country(&self) -> Option<&Country> {
        self.current_country.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn asked_countries(&self) -> &BTreeSet<Country> {
        &self.asked_countries
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn question_request(&self) -> QuestionRequest {
        QuestionRequest {
            asked: self.asked_countries.iter().cloned().collect(),
        }
    }

    /// A result is only applied to the question it was submitted for.
    pub(crate) fn ensure_current(&self, country: &Country) -> Result<(), TransportError> {
        match self.current_country() {
            Some(current) if current == country => Ok(()),
            current => Err(TransportError::malformed(format!(
                "answer result for {country} arrived while {current:?} is active"
            ))),
        }
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Makes `country` current and remembers it; re-inserting is a no-op.
    pub(crate) fn record_question(&mut self, country: Country) {
        self.asked_countries.insert(country.clone());
        self.current_country = Some(country);
    }

    pub(crate) fn record_correct_answer(&mut self) -> u32 {
        self.score += 1;
        self.score
    }

    pub(crate) fn finish(&mut self) {
        self.game_over = true;
    }
}
