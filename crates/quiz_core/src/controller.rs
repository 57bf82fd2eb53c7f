//! The question cycle: fetch a country, grade the user's answer, show the
//! capital on the map, repeat until the service runs out of countries.

use shared::{
    domain::{Country, GeoPoint},
    protocol::{AnswerResult, CheckAnswerRequest, QuestionRequest, QuestionResponse},
};
use tracing::{debug, error, info, warn};

use crate::{
    service::QuizService,
    state::{GamePhase, GameState},
    view::{FeedbackStyle, MapRenderer, QuizView, TileSource},
};

pub const LOADING_TEXT: &str = "Loading question...";
pub const QUESTION_FAILED_TEXT: &str = "Failed to load question. Please refresh.";
pub const SUBMIT_FAILED_TEXT: &str = "Could not check answer. Please try again.";

pub const WORLD_CENTER: GeoPoint = GeoPoint::new(20.0, 0.0);
pub const WORLD_ZOOM: u8 = 2;
pub const CAPITAL_ZOOM: u8 = 6;

pub fn question_prompt(country: &Country) -> String {
    format!("What is the capital of {country}?")
}

/// User actions the host forwards to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Submit(String),
    Next,
}

/// Owns the session state and drives the view and map from it.
///
/// Every operation takes `&mut self` across its single service call, so a
/// second request can never start while one is outstanding.
pub struct GameController<S, V, M> {
    service: S,
    view: V,
    map: M,
    tiles: TileSource,
    state: GameState,
    phase: GamePhase,
    map_ready: bool,
}

impl<S, V, M> GameController<S, V, M>
where
    S: QuizService,
    V: QuizView,
    M: MapRenderer,
{
    pub fn new(service: S, view: V, map: M) -> Self {
        Self {
            service,
            view,
            map,
            tiles: TileSource::default(),
            state: GameState::default(),
            phase: GamePhase::Start,
            map_ready: false,
        }
    }

    pub fn with_tiles(mut self, tiles: TileSource) -> Self {
        self.tiles = tiles;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Sets up the map and score display, then loads the first question.
    pub async fn start(&mut self) -> GamePhase {
        if self.map_ready {
            warn!(phase = ?self.phase, "quiz already started");
            return self.phase;
        }
        self.map.init(WORLD_CENTER, WORLD_ZOOM, &self.tiles);
        self.map_ready = true;
        self.view.set_score(self.state.score());
        self.load_question().await
    }

    pub async fn handle(&mut self, event: GameEvent) -> GamePhase {
        match event {
            GameEvent::Submit(answer) => self.submit_answer(&answer).await,
            GameEvent::Next => self.request_next_question().await,
        }
    }

    pub async fn request_next_question(&mut self) -> GamePhase {
        if !self.phase.accepts_next() {
            warn!(phase = ?self.phase, "ignoring next-question request");
            return self.phase;
        }
        self.load_question().await
    }

    async fn load_question(&mut self) -> GamePhase {
        let request = self.begin_question_fetch();
        debug!(asked = request.asked.len(), "requesting next question");
        let outcome = self.service.next_question(&request).await;
        self.state.set_loading(false);

        self.phase = match outcome {
            Ok(QuestionResponse::GameOver { message }) => {
                info!(score = self.state.score(), "no questions left, game over");
                self.state.finish();
                self.view.set_input_enabled(false);
                self.view.set_submit_visible(false);
                self.view.set_next_visible(false);
                self.view.set_form_visible(false);
                self.view.set_question_text(&message);
                GamePhase::GameOver
            }
            Ok(QuestionResponse::Question { country }) => {
                if self.state.asked_countries().contains(&country) {
                    warn!(%country, "service repeated an already asked country");
                }
                self.view.set_question_text(&question_prompt(&country));
                self.state.record_question(country);
                GamePhase::QuestionActive
            }
            Err(err) => {
                error!(error = %err, "failed to fetch question");
                self.view.set_question_text(QUESTION_FAILED_TEXT);
                self.view.set_input_enabled(false);
                self.view.set_submit_visible(false);
                GamePhase::LoadFailed
            }
        };
        self.phase
    }

    fn begin_question_fetch(&mut self) -> QuestionRequest {
        self.reset_for_next_question();
        self.phase = GamePhase::LoadingQuestion;
        self.state.set_loading(true);
        self.state.question_request()
    }

    pub async fn submit_answer(&mut self, user_answer: &str) -> GamePhase {
        if !self.phase.accepts_submit() {
            warn!(phase = ?self.phase, "ignoring answer submission");
            return self.phase;
        }
        let Some(country) = self.state.current_country().cloned() else {
            warn!("answer submitted with no active question");
            return self.phase;
        };

        let previous = self.phase;
        let request = self.begin_check(user_answer, country.clone());
        let outcome = self
            .service
            .check_answer(&request)
            .await
            .and_then(|result| self.state.ensure_current(&country).map(|()| result));

        self.state.set_loading(false);
        self.view.set_submit_busy(false);
        self.view.set_input_enabled(true);

        self.phase = match outcome {
            Ok(result) => {
                self.show_result(&result);
                GamePhase::ResultShown
            }
            Err(err) => {
                error!(error = %err, %country, ?previous, "failed to check answer");
                self.view.set_feedback(SUBMIT_FAILED_TEXT, FeedbackStyle::Neutral);
                GamePhase::SubmitFailed
            }
        };
        self.phase
    }

    fn begin_check(&mut self, user_answer: &str, country: Country) -> CheckAnswerRequest {
        self.phase = GamePhase::Submitting;
        self.state.set_loading(true);
        self.view.set_input_enabled(false);
        self.view.set_submit_busy(true);
        CheckAnswerRequest {
            answer: user_answer.to_string(),
            country,
        }
    }

    fn show_result(&mut self, result: &AnswerResult) {
        if result.correct {
            let score = self.state.record_correct_answer();
            self.view.set_score(score);
        }
        self.view
            .set_feedback(&result.message, FeedbackStyle::for_result(result.correct));

        let point = result.location.point();
        self.map.fly_to(point, CAPITAL_ZOOM);
        self.map.place_marker(point, &result.location.capital, true);
        info!(
            correct = result.correct,
            capital = %result.location.capital,
            score = self.state.score(),
            "answer checked"
        );

        self.view.set_submit_visible(false);
        self.view.set_next_visible(true);
    }

    fn reset_for_next_question(&mut self) {
        self.view.set_submit_busy(false);
        self.view.set_question_text(LOADING_TEXT);
        self.view.set_feedback("", FeedbackStyle::Neutral);
        self.view.clear_input();
        self.view.set_input_enabled(true);
        self.view.focus_input();
        self.view.set_submit_visible(true);
        self.view.set_next_visible(false);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
