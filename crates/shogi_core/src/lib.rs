pub mod kif;
pub mod types;

pub use types::*;

use thiserror::Error;

// =============================================================================
// Rules trait: the narrow interface to the external rules-and-notation engine
// =============================================================================

/// The rules engine refused to apply a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rules engine rejected the move: {0}")]
pub struct EngineError(pub String);

/// The notation collaborator could not read a game record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unreadable game record: {0}")]
pub struct ParseError(pub String);

/// Interface to the external rules-and-notation engine.
///
/// The move-input controller never computes legality itself; every question
/// about the game rules goes through this trait. Implementations are expected
/// to be pure: `apply` leaves the input position untouched on failure, and
/// the lookup methods have no side effects.
pub trait Rules {
    /// Immutable position snapshot: occupancy, side to move, hand counts.
    type Position: Clone;

    /// The position before any move has been played.
    fn start_position(&self) -> Self::Position;

    fn side_to_move(&self, pos: &Self::Position) -> Color;

    /// Every legal move in `pos`, normal and drop variants, each fully
    /// specified including its promotion flag. A square pair where the
    /// player may choose to promote appears as two candidates.
    fn legal_moves(&self, pos: &Self::Position) -> Vec<Move>;

    /// Apply `mv` to `pos`, returning the successor position.
    fn apply(&self, pos: &Self::Position, mv: Move) -> Result<Self::Position, EngineError>;

    /// Parse a game record into its move sequence.
    fn parse_record(&self, text: &str) -> Result<Vec<Move>, ParseError>;

    /// Piece on `sq`, if any. Pure lookup for labels and presentation.
    fn piece_at(&self, pos: &Self::Position, sq: u8) -> Option<Piece>;

    /// Captured pieces in `color`'s hand as (kind, count) pairs.
    fn hand(&self, pos: &Self::Position, color: Color) -> Vec<(PieceKind, u8)>;
}
