//! Stdin event loop: turns typed lines into submit/next events.

use std::io::Write;

use quiz_core::{GameController, GameEvent, MapRenderer, QuizService};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::terminal::TerminalView;

pub const QUIT_COMMAND: &str = ":q";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub asked: usize,
    pub finished: bool,
}

pub async fn run<S, W, M, R>(
    controller: &mut GameController<S, TerminalView<W>, M>,
    input: R,
) -> std::io::Result<SessionSummary>
where
    S: QuizService,
    W: Write,
    M: MapRenderer,
    R: AsyncBufRead + Unpin,
{
    controller.start().await;
    let mut lines = input.lines();

    while !controller.phase().is_terminal() {
        if !controller.view_mut().prompt() {
            break;
        }
        let Some(line) = lines.next_line().await? else {
            debug!("input closed");
            break;
        };
        let line = line.trim();
        if line == QUIT_COMMAND {
            break;
        }

        let event = if controller.view().offers_next() {
            GameEvent::Next
        } else if line.is_empty() {
            continue;
        } else {
            GameEvent::Submit(line.to_string())
        };
        controller.handle(event).await;
    }

    Ok(SessionSummary {
        score: controller.score(),
        asked: controller.state().asked_countries().len(),
        finished: controller.state().is_game_over(),
    })
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
