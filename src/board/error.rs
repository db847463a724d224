//! Error types for board and game operations.

use std::fmt;

use super::types::{Color, Piece, Square};

/// Error type for board-encoding parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Encoding has too few fields (needs placement and side to move)
    TooFewParts { found: usize },
    /// Invalid piece character in placement field
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Placement field does not have exactly eight ranks
    InvalidRank { rank: usize },
    /// A rank does not describe exactly eight files
    RankLength { rank: usize, files: usize },
    /// A color does not have exactly one king
    KingCount { color: Color, found: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "Board encoding must have at least 2 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in board encoding")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in board encoding")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidRank { rank } => {
                write!(f, "Invalid rank index {rank} in board encoding")
            }
            FenError::RankLength { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::KingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for UCI move text parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for SAN (Standard Algebraic Notation) parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty SAN string
    Empty,
    /// Invalid piece character
    InvalidPiece { char: char },
    /// Invalid square in SAN
    InvalidSquare { notation: String },
    /// Ambiguous move (multiple pieces can reach the target)
    AmbiguousMove { san: String },
    /// No matching legal move found
    NoMatchingMove { san: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty SAN string"),
            SanError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in SAN")
            }
            SanError::InvalidSquare { notation } => {
                write!(f, "Invalid square in SAN '{notation}'")
            }
            SanError::AmbiguousMove { san } => {
                write!(f, "Ambiguous move '{san}'")
            }
            SanError::NoMatchingMove { san } => {
                write!(f, "No legal move matches '{san}'")
            }
            SanError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for SanError {}

/// Why a move could not be applied to a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    /// Nothing stands on the source square
    EmptySquare,
    /// The piece on the source square is not the one the move names
    PieceMismatch { found: Piece, color: Color },
    /// The destination holds a piece of the mover's own color
    OwnPieceOnTarget,
    /// The destination holds a king; kings are never captured
    KingOnTarget,
    /// A castling move without an own rook on the castling corner
    MissingCastlingRook,
    /// A castling move whose king or rook would land on an occupied square
    CastlingSquareOccupied { square: Square },
    /// Promotion requested for a square that holds no pawn
    NotAPawn,
}

impl fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveReason::EmptySquare => write!(f, "square is empty"),
            InvalidMoveReason::PieceMismatch { found, color } => {
                write!(f, "square holds a {color} {found}")
            }
            InvalidMoveReason::OwnPieceOnTarget => write!(f, "destination holds an own piece"),
            InvalidMoveReason::KingOnTarget => write!(f, "destination holds a king"),
            InvalidMoveReason::MissingCastlingRook => write!(f, "no rook to castle with"),
            InvalidMoveReason::CastlingSquareOccupied { square } => {
                write!(f, "castling needs {square} to be empty")
            }
            InvalidMoveReason::NotAPawn => write!(f, "no pawn to promote"),
        }
    }
}

/// Errors raised by the game state machine.
///
/// Every operation that returns one of these leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Source square empty or holding a different piece than expected
    InvalidMove {
        square: Square,
        reason: InvalidMoveReason,
    },
    /// History navigation past either end
    OutOfRange { cursor: usize, len: usize },
    /// Destination not among the legal destinations of the piece
    IllegalDestination { from: Square, to: Square },
    /// Unparseable move text from the external search process
    MalformedExternalMove {
        notation: String,
        error: MoveParseError,
    },
    /// A pawn is waiting for its promotion choice
    PromotionPending { square: Square },
    /// A promotion choice was made while no pawn is waiting
    NoPromotionPending,
    /// A pawn cannot promote to this piece
    InvalidPromotionPiece { piece: Piece },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidMove { square, reason } => {
                write!(f, "Invalid move from {square}: {reason}")
            }
            GameError::OutOfRange { cursor, len } => {
                write!(f, "History cursor {cursor} cannot move (history has {len} moves)")
            }
            GameError::IllegalDestination { from, to } => {
                write!(f, "Illegal destination {to} for the piece on {from}")
            }
            GameError::MalformedExternalMove { notation, error } => {
                write!(f, "Malformed engine move '{notation}': {error}")
            }
            GameError::PromotionPending { square } => {
                write!(f, "Pawn on {square} is waiting for a promotion choice")
            }
            GameError::NoPromotionPending => write!(f, "No promotion is pending"),
            GameError::InvalidPromotionPiece { piece } => {
                write!(f, "Cannot promote to {piece}")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Errors raised while importing a game record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A SAN token did not resolve to a legal move at its ply
    San { ply: usize, error: SanError },
    /// A UCI move token could not be parsed
    Notation { ply: usize, error: MoveParseError },
    /// A move could not be replayed at its ply
    Replay { ply: usize, error: GameError },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::San { ply, error } => write!(f, "Record ply {ply}: {error}"),
            RecordError::Notation { ply, error } => write!(f, "Record ply {ply}: {error}"),
            RecordError::Replay { ply, error } => write!(f, "Record ply {ply}: {error}"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::San { error, .. } => Some(error),
            RecordError::Notation { error, .. } => Some(error),
            RecordError::Replay { error, .. } => Some(error),
        }
    }
}
