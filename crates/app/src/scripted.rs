//! Table-driven stand-in for the external rules engine, shared by the unit
//! tests in this crate.
//!
//! A position is nothing but a `u32` identity; legality, successors, board
//! lookups, and parsable records all come from tables the test scripts in.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use shogi_core::{Color, EngineError, Move, ParseError, Piece, PieceKind, Rules};

use crate::resolver::PromotionPrompt;

#[derive(Default)]
pub struct ScriptedRules {
    /// Per position: legal moves with their successor positions, in order.
    /// Duplicates are allowed so tests can script engine defects.
    legal: HashMap<u32, Vec<(Move, u32)>>,
    to_move: HashMap<u32, Color>,
    pieces: HashMap<(u32, u8), Piece>,
    hands: HashMap<(u32, Color), Vec<(PieceKind, u8)>>,
    records: HashMap<String, Vec<Move>>,
}

impl ScriptedRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, pos: u32, mv: Move, successor: u32) -> Self {
        self.legal.entry(pos).or_default().push((mv, successor));
        self
    }

    pub fn to_move(mut self, pos: u32, color: Color) -> Self {
        self.to_move.insert(pos, color);
        self
    }

    pub fn piece(mut self, pos: u32, sq: u8, piece: Piece) -> Self {
        self.pieces.insert((pos, sq), piece);
        self
    }

    pub fn in_hand(mut self, pos: u32, color: Color, kind: PieceKind, count: u8) -> Self {
        self.hands
            .entry((pos, color))
            .or_default()
            .push((kind, count));
        self
    }

    pub fn record(mut self, text: &str, moves: Vec<Move>) -> Self {
        self.records.insert(text.to_string(), moves);
        self
    }
}

impl Rules for ScriptedRules {
    type Position = u32;

    fn start_position(&self) -> u32 {
        0
    }

    fn side_to_move(&self, pos: &u32) -> Color {
        self.to_move.get(pos).copied().unwrap_or(Color::Black)
    }

    fn legal_moves(&self, pos: &u32) -> Vec<Move> {
        self.legal
            .get(pos)
            .map(|entries| entries.iter().map(|&(mv, _)| mv).collect())
            .unwrap_or_default()
    }

    fn apply(&self, pos: &u32, mv: Move) -> Result<u32, EngineError> {
        self.legal
            .get(pos)
            .and_then(|entries| entries.iter().find(|&&(m, _)| m == mv))
            .map(|&(_, successor)| successor)
            .ok_or_else(|| EngineError(format!("illegal move in position {pos}")))
    }

    fn parse_record(&self, text: &str) -> Result<Vec<Move>, ParseError> {
        self.records
            .get(text)
            .cloned()
            .ok_or_else(|| ParseError("unrecognized record".to_string()))
    }

    fn piece_at(&self, pos: &u32, sq: u8) -> Option<Piece> {
        self.pieces.get(&(*pos, sq)).copied()
    }

    fn hand(&self, pos: &u32, color: Color) -> Vec<(PieceKind, u8)> {
        self.hands.get(&(*pos, color)).cloned().unwrap_or_default()
    }
}

/// Prompt that always answers the same way and counts how often it is asked.
pub struct ScriptedPrompt {
    answer: bool,
    calls: Rc<Cell<usize>>,
}

impl ScriptedPrompt {
    pub fn new(answer: bool) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                answer,
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }
}

impl PromotionPrompt for ScriptedPrompt {
    fn confirm(&mut self, _from: u8, _to: u8) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.answer
    }
}
