//! Client-side core of the capital-city quiz: game state, the question/answer
//! state machine, and the seams to the HTTP service, the page and the map.

pub mod controller;
pub mod error;
pub mod service;
pub mod state;
pub mod view;

pub use controller::{question_prompt, GameController, GameEvent};
pub use error::TransportError;
pub use service::{HttpQuizService, QuizService};
pub use state::{GamePhase, GameState};
pub use view::{FeedbackStyle, MapRenderer, QuizView, TileSource};
