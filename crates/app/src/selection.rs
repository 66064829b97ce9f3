//! What the user has armed as a move source, and the squares it can reach.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shogi_core::{Move, Piece, Rules};

/// Armed move source.
///
/// Owned by the controller and reset to `None` on every completed or
/// rejected move attempt, every cancel, and every navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveFrom {
    /// Nothing armed.
    #[default]
    None,
    /// A board square whose piece is about to move.
    Square(u8),
    /// A captured piece about to be dropped.
    Drop(Piece),
}

/// Destination squares reachable from the current selection.
///
/// Pure function of `(selection, position)`; the controller recomputes it in
/// the same transition that changes either, so the set never outlives the
/// selection it was derived from.
pub fn attack_squares<R: Rules>(rules: &R, from: MoveFrom, pos: &R::Position) -> HashSet<u8> {
    match from {
        MoveFrom::None => HashSet::new(),
        MoveFrom::Square(source) => rules
            .legal_moves(pos)
            .into_iter()
            .filter_map(|mv| match mv {
                Move::Normal { from, to, .. } if from == source => Some(to),
                _ => None,
            })
            .collect(),
        MoveFrom::Drop(piece) => {
            // A captured piece of the side not on move reaches nowhere.
            if piece.color != rules.side_to_move(pos) {
                return HashSet::new();
            }
            rules
                .legal_moves(pos)
                .into_iter()
                .filter_map(|mv| match mv {
                    Move::Drop { kind, to } if kind == piece.kind => Some(to),
                    _ => None,
                })
                .collect()
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
