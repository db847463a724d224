//! Running a game against an external UCI search process.
//!
//! [`Session`] owns the game, the engine options and the
//! [`AnalysisTracker`] that matches replies to the position they were
//! requested for.

mod session;
mod tracker;

pub use session::{Dispatch, Session, SessionEvent, SharedSession};
pub use tracker::{AnalysisTracker, EngineEvent};
