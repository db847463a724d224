//! Correlates search-process replies with the position they were asked
//! about.
//!
//! The user may move or navigate while a search runs, so every reply is
//! checked against the encoding of the position the tracker last asked
//! about. Replies for any other position are dropped.

use log::debug;

use crate::uci::{EngineMessage, Score, SearchRequest, UciMove};

/// A reply that belongs to the current position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    Evaluation { score: Score, depth: Option<u32> },
    /// The search finished; `None` when the process found no move
    BestMove(Option<UciMove>),
}

#[derive(Clone, Debug, Default)]
pub struct AnalysisTracker {
    pending: Option<SearchRequest>,
    last_score: Option<Score>,
}

impl AnalysisTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a search of `fen`. Returns the request it replaces
    /// if one was still running.
    pub fn begin(&mut self, request: SearchRequest) -> Option<SearchRequest> {
        debug!("analysis requested for {}", request.fen);
        self.last_score = None;
        self.pending.replace(request)
    }

    /// Forget the running request; its replies will be dropped.
    pub fn cancel(&mut self) -> Option<SearchRequest> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&SearchRequest> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    /// Latest score reported for the pending (or last finished) search.
    #[must_use]
    pub fn last_score(&self) -> Option<Score> {
        self.last_score
    }

    /// Filter one parsed message against the position now on the board.
    pub fn accept(&mut self, message: EngineMessage, current_fen: &str) -> Option<EngineEvent> {
        let Some(request) = &self.pending else {
            debug!("no search pending, dropping {message:?}");
            return None;
        };
        if request.fen != current_fen {
            debug!(
                "stale engine reply for {} (board is at {current_fen}), dropping {message:?}",
                request.fen
            );
            return None;
        }

        match message {
            EngineMessage::Info {
                depth,
                score: Some(score),
            } => {
                self.last_score = Some(score);
                Some(EngineEvent::Evaluation { score, depth })
            }
            EngineMessage::BestMove(best) => {
                self.pending = None;
                Some(EngineEvent::BestMove(best))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

    fn info(cp: i32) -> EngineMessage {
        EngineMessage::Info {
            depth: Some(10),
            score: Some(Score::Centipawns(cp)),
        }
    }

    #[test]
    fn test_replies_for_current_position_pass() {
        let mut tracker = AnalysisTracker::new();
        tracker.begin(SearchRequest::new(START, 10));

        assert_eq!(
            tracker.accept(info(20), START),
            Some(EngineEvent::Evaluation {
                score: Score::Centipawns(20),
                depth: Some(10)
            })
        );
        assert_eq!(tracker.last_score(), Some(Score::Centipawns(20)));

        let best: UciMove = "e2e4".parse().unwrap();
        assert_eq!(
            tracker.accept(EngineMessage::BestMove(Some(best)), START),
            Some(EngineEvent::BestMove(Some(best)))
        );
        assert!(!tracker.is_searching());
    }

    #[test]
    fn test_stale_replies_dropped() {
        let mut tracker = AnalysisTracker::new();
        tracker.begin(SearchRequest::new(START, 10));

        // The user played e4 before the reply arrived.
        assert_eq!(tracker.accept(info(20), AFTER_E4), None);
        assert_eq!(
            tracker.accept(EngineMessage::BestMove("e2e4".parse().ok()), AFTER_E4),
            None
        );
        assert!(tracker.is_searching());
        assert_eq!(tracker.last_score(), None);
    }

    #[test]
    fn test_superseded_request() {
        let mut tracker = AnalysisTracker::new();
        assert_eq!(tracker.begin(SearchRequest::new(START, 10)), None);
        let old = tracker.begin(SearchRequest::new(AFTER_E4, 10));
        assert_eq!(old.map(|r| r.fen), Some(START.to_string()));
        assert_eq!(tracker.accept(info(5), START), None);
        assert!(tracker.accept(info(5), AFTER_E4).is_some());
    }

    #[test]
    fn test_nothing_pending() {
        let mut tracker = AnalysisTracker::new();
        assert_eq!(tracker.accept(info(1), START), None);
        tracker.begin(SearchRequest::new(START, 4));
        assert!(tracker.cancel().is_some());
        assert_eq!(tracker.accept(EngineMessage::BestMove(None), START), None);
    }

    #[test]
    fn test_handshake_lines_ignored() {
        let mut tracker = AnalysisTracker::new();
        tracker.begin(SearchRequest::new(START, 4));
        assert_eq!(tracker.accept(EngineMessage::ReadyOk, START), None);
        assert!(tracker.is_searching());
    }
}
