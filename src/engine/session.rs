//! A game plus its link to the external search process.
//!
//! The UI and the thread reading the search process both mutate the same
//! game, so the session is shared behind one lock ([`SharedSession`]) and
//! every mutation runs to completion while holding it.

use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::board::{GameError, Move};
use crate::game::{GameState, Outcome};
use crate::uci::{parse_engine_line, EngineOptions, OptionChange, Score, SearchRequest, UciMove};

use super::tracker::{AnalysisTracker, EngineEvent};

pub type SharedSession = Arc<Mutex<Session>>;

/// A search to send to the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub request: SearchRequest,
    /// A previous search was still running and must be stopped first
    pub superseded: bool,
}

impl Dispatch {
    /// Lines to write, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        if self.superseded {
            lines.push("stop".to_string());
        }
        lines.extend(self.request.commands());
        lines
    }
}

/// What an engine line did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Score from White's point of view
    Evaluation { score: Score, depth: Option<u32> },
    /// The process plays this side and its move was applied
    Played(Move),
    /// Best move for a side the process does not play
    Suggested(UciMove),
    /// The search ended without a move
    NoMove,
}

#[derive(Debug, Default)]
pub struct Session {
    game: GameState,
    options: EngineOptions,
    tracker: AnalysisTracker,
}

impl Session {
    #[must_use]
    pub fn new(game: GameState, options: EngineOptions) -> Self {
        Session {
            game,
            options,
            tracker: AnalysisTracker::new(),
        }
    }

    #[must_use]
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Mutable access for user actions. Call [`Session::sync`] afterwards
    /// so the search follows the new position.
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[must_use]
    pub fn tracker(&self) -> &AnalysisTracker {
        &self.tracker
    }

    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Option<OptionChange> {
        let change = self.options.apply_setoption(name, value);
        match &change {
            Some(change) => info!("option changed: {change:?}"),
            None => warn!("ignored setoption {name} = {value:?}"),
        }
        change
    }

    /// True when the external process plays the side to move.
    #[must_use]
    pub fn engine_to_move(&self) -> bool {
        self.options.opponent == Some(self.game.side_to_move())
    }

    /// Ask for a search of the current position unless one is already
    /// running for it. Finished games and pending promotions are not
    /// searched.
    pub fn sync(&mut self) -> Option<Dispatch> {
        if self.game.pending_promotion().is_some() || self.game.outcome() != Outcome::Ongoing {
            if let Some(stale) = self.tracker.cancel() {
                debug!("search of {} abandoned", stale.fen);
            }
            return None;
        }

        let fen = self.game.fen();
        if self.tracker.pending().is_some_and(|r| r.fen == fen) {
            return None;
        }
        let request = SearchRequest::new(fen, self.options.search_depth);
        let superseded = self.tracker.begin(request.clone()).is_some();
        Some(Dispatch {
            request,
            superseded,
        })
    }

    /// Feed one line of process output.
    ///
    /// A best move for the side the process plays is applied to the game;
    /// replies about an earlier position are dropped.
    pub fn handle_engine_line(&mut self, line: &str) -> Result<Option<SessionEvent>, GameError> {
        let Some(message) = parse_engine_line(line)? else {
            return Ok(None);
        };
        let fen = self.game.fen();
        let event = match self.tracker.accept(message, &fen) {
            None => return Ok(None),
            Some(event) => event,
        };

        match event {
            EngineEvent::Evaluation { score, depth } => Ok(Some(SessionEvent::Evaluation {
                score: score.for_white(self.game.side_to_move()),
                depth,
            })),
            EngineEvent::BestMove(None) => Ok(Some(SessionEvent::NoMove)),
            EngineEvent::BestMove(Some(best)) if self.engine_to_move() => {
                let mv = self.game.apply_external_move(&best.to_string())?;
                info!("engine played {best}");
                Ok(Some(SessionEvent::Played(mv)))
            }
            EngineEvent::BestMove(Some(best)) => Ok(Some(SessionEvent::Suggested(best))),
        }
    }
}
