//! Importing game records.
//!
//! A record is an ordered list of [`ImportedMove`]s produced from
//! movetext (SAN tokens, as in a PGN body) or from UCI move texts. Records
//! are replayed through the history cursor, not re-derived: once imported,
//! a move is applied as recorded.

use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{
    CastleSide, Color, GameError, InvalidMoveReason, Move, Piece, Position, RecordError, Square,
};
use crate::uci::UciMove;

/// One ply of an imported record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportedMove {
    pub from: Square,
    pub to: Square,
    /// Kind of the piece leaving `from`
    pub piece: Piece,
    pub color: Color,
    /// The notation the move was written in, when it came from movetext
    pub san: Option<String>,
    pub promotion: Option<Piece>,
}

impl ImportedMove {
    /// The move to record in a history.
    ///
    /// Castling is inferred from a two-file king step off the home square.
    /// A pawn arriving on its last rank without a promotion piece becomes a
    /// queen.
    #[must_use]
    pub fn to_move(&self) -> Move {
        let mut mv = Move::new(self.from, self.to, self.piece, self.color);
        if self.piece == Piece::King && self.from == CastleSide::king_home(self.color) {
            mv.castle = CastleSide::from_king_move(self.from, self.to);
        }
        if mv.reaches_promotion_rank() {
            mv.promotion = Some(self.promotion.unwrap_or(Piece::Queen));
        }
        mv
    }

    fn from_resolved(mv: &Move, san: String) -> Self {
        ImportedMove {
            from: mv.from,
            to: mv.to,
            piece: mv.piece,
            color: mv.color,
            san: Some(san),
            promotion: mv.promotion,
        }
    }
}

impl From<&ImportedMove> for Move {
    fn from(record: &ImportedMove) -> Self {
        record.to_move()
    }
}

/// Moves for [`GameState::load_external_move_list`](super::GameState::load_external_move_list).
#[must_use]
pub fn record_moves(records: &[ImportedMove]) -> Vec<Move> {
    records.iter().map(ImportedMove::to_move).collect()
}

/// Split movetext into SAN tokens.
///
/// Tag pairs, `{}` and `;` comments, `()` variations, move numbers, NAGs
/// and the result marker are dropped.
#[must_use]
pub fn movetext_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut brace = false;
    let mut line_comment = false;
    let mut tag = false;
    let mut variation_depth = 0usize;

    for c in text.chars() {
        if line_comment {
            line_comment = c != '\n';
            continue;
        }
        if brace {
            brace = c != '}';
            continue;
        }
        if tag {
            tag = c != ']';
            continue;
        }
        match c {
            '{' => {
                flush(&mut current, &mut tokens);
                brace = true;
            }
            ';' => {
                flush(&mut current, &mut tokens);
                line_comment = true;
            }
            '[' => {
                flush(&mut current, &mut tokens);
                tag = true;
            }
            '(' => {
                flush(&mut current, &mut tokens);
                variation_depth += 1;
            }
            ')' => {
                current.clear();
                variation_depth = variation_depth.saturating_sub(1);
            }
            _ if variation_depth > 0 => {}
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            c => current.push(c),
        }
    }
    flush(&mut current, &mut tokens);
    tokens
}

/// Strip a leading move number and reject non-move tokens.
fn san_token(raw: &str) -> Option<String> {
    let after_digits = raw.trim_start_matches(|c: char| c.is_ascii_digit());
    let token = if after_digits.len() < raw.len() && after_digits.starts_with('.') {
        after_digits.trim_start_matches('.')
    } else {
        raw
    };
    match token {
        "" | "*" | "1-0" | "0-1" | "1/2-1/2" => None,
        t if t.starts_with('$') => None,
        t => Some(t.to_string()),
    }
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if let Some(token) = san_token(current) {
        tokens.push(token);
    }
    current.clear();
}

/// Resolve movetext into a record, replaying it from `start`.
///
/// Every SAN token must name a legal move at its ply.
pub fn parse_movetext(
    start: &Position,
    side: Color,
    text: &str,
) -> Result<Vec<ImportedMove>, RecordError> {
    let mut position = start.clone();
    let mut side = side;
    let mut record = Vec::new();

    for (ply, token) in movetext_tokens(text).into_iter().enumerate() {
        let mv = position.parse_san(side, &token).map_err(|error| {
            warn!("record ply {ply}: '{token}' does not resolve: {error}");
            RecordError::San { ply, error }
        })?;
        position
            .make_move(&mv)
            .map_err(|error| RecordError::Replay { ply, error })?;
        record.push(ImportedMove::from_resolved(&mv, token));
        side = side.opponent();
    }
    Ok(record)
}

/// Build a record from UCI move texts, replaying them from `start`.
///
/// Moves are replayed as given rather than checked against the legal move
/// list; a move whose origin holds no piece ends the import.
pub fn import_uci_moves<S: AsRef<str>>(
    start: &Position,
    texts: &[S],
) -> Result<Vec<ImportedMove>, RecordError> {
    let mut position = start.clone();
    let mut record = Vec::new();

    for (ply, text) in texts.iter().enumerate() {
        let uci: UciMove = text
            .as_ref()
            .parse()
            .map_err(|error| RecordError::Notation { ply, error })?;
        let mut mv = position
            .move_between(uci.from, uci.to)
            .ok_or(RecordError::Replay {
                ply,
                error: GameError::InvalidMove {
                    square: uci.from,
                    reason: InvalidMoveReason::EmptySquare,
                },
            })?;
        if mv.reaches_promotion_rank() {
            mv = mv.with_promotion(uci.promotion.unwrap_or(Piece::Queen));
        }
        let san = position.move_to_san(&mv);
        position.make_move(&mv).map_err(|error| {
            warn!("record ply {ply}: cannot replay {}: {error}", text.as_ref());
            RecordError::Replay { ply, error }
        })?;
        record.push(ImportedMove::from_resolved(&mv, san));
    }
    Ok(record)
}
