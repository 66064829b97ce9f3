//! Read-only projections of the record for the kifu list and highlights.

use shogi_core::{kif, Color, Move, PieceKind, Rules};

use crate::app::ShogiApp;
use crate::tree::NodeId;

/// One selectable row of the kifu list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KifuEntry {
    pub id: NodeId,
    pub label: String,
}

/// Rows for every main-line node, root first.
///
/// Row 0 is the start-position marker; row `n` is the `n`-th ply with its
/// KIF label. Pair with [`current_ply`] to highlight the cursor's row.
pub fn kifu_list<R: Rules>(app: &ShogiApp<R>) -> Vec<KifuEntry> {
    let rules = app.rules();
    let mut rows = Vec::new();
    let mut before: Option<&R::Position> = None;
    for (ply, (id, node)) in app.game.main_line().enumerate() {
        let label = match (node.mv, before) {
            (Some(mv), Some(pos)) => {
                let color = rules.side_to_move(pos);
                let moved = match mv {
                    Move::Normal { from, .. } => rules.piece_at(pos, from),
                    Move::Drop { .. } => None,
                };
                kif::move_label(ply, color, mv, moved)
            }
            _ => kif::START_LABEL.to_string(),
        };
        rows.push(KifuEntry { id, label });
        before = Some(&node.position);
    }
    rows
}

/// Ply of the cursor, i.e. the kifu-list row to highlight.
pub fn current_ply<R: Rules>(app: &ShogiApp<R>) -> usize {
    app.game.current_ply()
}

/// Destination square of the move that produced the current position, for
/// last-move highlighting. `None` at the root.
pub fn last_to_square<R: Rules>(app: &ShogiApp<R>) -> Option<u8> {
    app.game.current_node().mv.map(Move::to)
}

/// Rack contents for `color` at the current position, for the hand views.
pub fn hand_counts<R: Rules>(app: &ShogiApp<R>, color: Color) -> Vec<(PieceKind, u8)> {
    app.rules().hand(app.game.current_position(), color)
}

#[cfg(test)]
#[path = "kifu_tests.rs"]
mod kifu_tests;
