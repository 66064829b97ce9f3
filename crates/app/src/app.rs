//! Top-level controller: composite UI state and the action reducer.

use std::collections::HashSet;

use shogi_core::{Move, Piece, Rules};
use thiserror::Error;
use tracing::{debug, warn};

use crate::resolver::{self, PromotionPrompt};
use crate::selection::{attack_squares, MoveFrom};
use crate::tree::{Game, NavigationError, NodeId};

/// One user gesture or command, fully described.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ClickBoard(u8),
    ClickHand(Piece),
    DragMove { from: u8, to: u8 },
    DragDrop { piece: Piece, to: u8 },
    GotoNext,
    GotoPrev,
    GotoFirst,
    GotoLast,
    GotoNode(NodeId),
    LoadRecord(String),
    ToggleReverse,
}

/// What an [`Action`] did to the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A move was resolved and the cursor advanced to its node.
    Applied,
    /// A move source was armed; the next board click completes the gesture.
    Selected,
    /// A pending selection was discarded.
    Cancelled,
    /// Nothing to do.
    NoOp,
    /// The cursor moved to another recorded position.
    Navigated,
    /// A freshly parsed record replaced the whole tree.
    Loaded,
    /// Board orientation flipped.
    Toggled,
    /// The action was refused; selection reset, everything else unchanged.
    Rejected(Rejection),
}

/// Why an action was refused. All variants are recoverable; the controller
/// reports them and carries on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no legal move matches the gesture")]
    IllegalMove,
    #[error("rules engine produced {candidates} candidates for one gesture")]
    EngineInvariant { candidates: usize },
    #[error("record load failed: {0}")]
    Parse(String),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Composite controller state: the game record, the armed selection, the
/// attack squares derived from it, and the board orientation.
///
/// The rules engine and the promotion prompt are injected at construction;
/// exclusive ownership of the state means one action is always processed to
/// completion before the next can start.
pub struct ShogiApp<R: Rules> {
    pub game: Game<R::Position>,
    pub move_from: MoveFrom,
    pub attack_squares: HashSet<u8>,
    pub reversed: bool,
    rules: R,
    prompt: Box<dyn PromotionPrompt>,
}

impl<R: Rules> ShogiApp<R> {
    /// Fresh game from the engine's start position.
    pub fn new(rules: R, prompt: Box<dyn PromotionPrompt>) -> Self {
        let game = Game::new(rules.start_position());
        Self {
            game,
            move_from: MoveFrom::None,
            attack_squares: HashSet::new(),
            reversed: false,
            rules,
            prompt,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Process one action to completion.
    ///
    /// Every rejection is reported and collapses to a selection reset;
    /// nothing here is fatal.
    pub fn update(&mut self, action: Action) -> Outcome {
        let outcome = self.dispatch(action);
        if let Outcome::Rejected(rejection) = &outcome {
            warn!(%rejection, "action rejected");
        }
        outcome
    }

    fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::ClickBoard(sq) => self.click_board(sq),
            Action::ClickHand(piece) => self.click_hand(piece),
            Action::DragMove { from, to } => self.drag_move(from, to),
            Action::DragDrop { piece, to } => self.drag_drop(piece, to),
            Action::GotoNext => self.navigate(|game| game.goto_next()),
            Action::GotoPrev => self.navigate(|game| game.goto_prev()),
            Action::GotoFirst => self.navigate(|game| {
                game.goto_first();
                Ok(())
            }),
            Action::GotoLast => self.navigate(|game| {
                game.goto_last();
                Ok(())
            }),
            Action::GotoNode(id) => self.navigate(move |game| game.goto_node(id)),
            Action::LoadRecord(text) => self.load_record(&text),
            Action::ToggleReverse => {
                self.reversed = !self.reversed;
                Outcome::Toggled
            }
        }
    }

    fn click_board(&mut self, sq: u8) -> Outcome {
        let legal = self.rules.legal_moves(self.game.current_position());
        match self.move_from {
            MoveFrom::None => {
                if !resolver::has_normal_source(&legal, sq) {
                    self.clear_selection();
                    return Outcome::NoOp;
                }
                self.arm(MoveFrom::Square(sq))
            }
            MoveFrom::Square(from) => {
                let resolved = resolver::resolve_normal(&legal, from, sq, self.prompt.as_mut());
                self.finish(resolved)
            }
            MoveFrom::Drop(piece) => {
                let side = self.rules.side_to_move(self.game.current_position());
                let resolved = resolver::resolve_drop(&legal, side, piece, sq);
                self.finish(resolved)
            }
        }
    }

    fn click_hand(&mut self, piece: Piece) -> Outcome {
        // Clicking the rack with anything armed always cancels; it never
        // switches to the clicked piece.
        if self.move_from != MoveFrom::None {
            self.clear_selection();
            return Outcome::Cancelled;
        }
        let legal = self.rules.legal_moves(self.game.current_position());
        let side = self.rules.side_to_move(self.game.current_position());
        if !resolver::has_drop(&legal, side, piece) {
            self.clear_selection();
            return Outcome::NoOp;
        }
        self.arm(MoveFrom::Drop(piece))
    }

    /// Drag gestures skip the two-phase selection but share its resolution.
    fn drag_move(&mut self, from: u8, to: u8) -> Outcome {
        let legal = self.rules.legal_moves(self.game.current_position());
        let resolved = resolver::resolve_normal(&legal, from, to, self.prompt.as_mut());
        self.finish(resolved)
    }

    fn drag_drop(&mut self, piece: Piece, to: u8) -> Outcome {
        let legal = self.rules.legal_moves(self.game.current_position());
        let side = self.rules.side_to_move(self.game.current_position());
        let resolved = resolver::resolve_drop(&legal, side, piece, to);
        self.finish(resolved)
    }

    /// Arm a selection and derive its attack squares in the same step.
    fn arm(&mut self, from: MoveFrom) -> Outcome {
        self.attack_squares = attack_squares(&self.rules, from, self.game.current_position());
        self.move_from = from;
        Outcome::Selected
    }

    /// Terminal step of every completed gesture: apply or reject, selection
    /// cleared either way.
    fn finish(&mut self, resolved: Result<Move, Rejection>) -> Outcome {
        self.clear_selection();
        let mv = match resolved {
            Ok(mv) => mv,
            Err(rejection) => return Outcome::Rejected(rejection),
        };
        match self.rules.apply(self.game.current_position(), mv) {
            Ok(position) => {
                let id = self.game.advance_with(mv, position);
                debug!(node = id.0, ?mv, "move applied");
                Outcome::Applied
            }
            Err(err) => {
                debug!(%err, ?mv, "engine refused a resolved move");
                Outcome::Rejected(Rejection::IllegalMove)
            }
        }
    }

    fn navigate<F>(&mut self, op: F) -> Outcome
    where
        F: FnOnce(&mut Game<R::Position>) -> Result<(), NavigationError>,
    {
        // Switching position invalidates any pending selection.
        self.clear_selection();
        match op(&mut self.game) {
            Ok(()) => {
                debug!(node = self.game.current().0, "cursor moved");
                Outcome::Navigated
            }
            Err(err) => Outcome::Rejected(Rejection::Navigation(err)),
        }
    }

    fn load_record(&mut self, text: &str) -> Outcome {
        self.clear_selection();
        let moves = match self.rules.parse_record(text) {
            Ok(moves) => moves,
            Err(err) => return Outcome::Rejected(Rejection::Parse(err.to_string())),
        };
        match Game::from_record(&self.rules, &moves) {
            Ok(game) => {
                self.game = game;
                debug!(moves = moves.len(), "record loaded");
                Outcome::Loaded
            }
            Err(err) => Outcome::Rejected(Rejection::Parse(err.to_string())),
        }
    }

    fn clear_selection(&mut self) {
        self.move_from = MoveFrom::None;
        self.attack_squares.clear();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
