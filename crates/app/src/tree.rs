//! Branching game record with a single navigation cursor.
//!
//! Nodes live in an append-only arena addressed by stable [`NodeId`]s. A
//! parent owns its children by id, as the continuation actually played
//! (`next`) plus recorded alternatives (`branch`); every child keeps a
//! non-owning back link to its parent. Nodes are never removed or edited
//! after creation, so an id handed to the host stays valid for the life of
//! the game.

use serde::{Deserialize, Serialize};
use shogi_core::{EngineError, Move, Rules};
use thiserror::Error;

/// Stable identifier of a tree node, unique within its [`Game`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// One ply of history: the position reached and the tree links around it.
#[derive(Debug, Clone)]
pub struct GameNode<P> {
    pub position: P,
    /// Move that produced this position; `None` only for the root.
    pub mv: Option<Move>,
    pub prev: Option<NodeId>,
    /// Continuation actually played next along this line.
    pub next: Option<NodeId>,
    /// Alternative continuations from this position, excluding `next`.
    pub branch: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("already at the last node of the line")]
    AtEnd,
    #[error("already at the root")]
    AtStart,
    #[error("no node {0:?} in the tree")]
    UnknownNode(NodeId),
}

/// The game record: an arena of nodes plus the cursor.
#[derive(Debug, Clone)]
pub struct Game<P> {
    nodes: Vec<GameNode<P>>,
    current: NodeId,
}

impl<P: Clone> Game<P> {
    /// Fresh game: a root node holding `start`, cursor on it.
    pub fn new(start: P) -> Self {
        Self {
            nodes: vec![GameNode {
                position: start,
                mv: None,
                prev: None,
                next: None,
                branch: Vec::new(),
            }],
            current: NodeId::ROOT,
        }
    }

    /// Rebuild a game by replaying a parsed record move by move.
    ///
    /// Fails if the engine refuses any replayed move; the cursor of the
    /// rebuilt game is left on the root so the host steps forward through
    /// the loaded record.
    pub fn from_record<R>(rules: &R, moves: &[Move]) -> Result<Self, EngineError>
    where
        R: Rules<Position = P>,
    {
        let mut game = Self::new(rules.start_position());
        for &mv in moves {
            let position = rules.apply(game.current_position(), mv)?;
            game.advance_with(mv, position);
        }
        game.current = NodeId::ROOT;
        Ok(game)
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn node(&self, id: NodeId) -> Option<&GameNode<P>> {
        self.nodes.get(id.0 as usize)
    }

    pub fn current_node(&self) -> &GameNode<P> {
        self.node_at(self.current)
    }

    pub fn current_position(&self) -> &P {
        &self.current_node().position
    }

    /// Total nodes in the arena, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_at(&self, id: NodeId) -> &GameNode<P> {
        // Ids never outlive the arena that issued them.
        &self.nodes[id.0 as usize]
    }

    /// Attach the result of `mv` below the cursor and advance to it.
    ///
    /// Re-playing a move for which the cursor already has a child (its
    /// `next` or a `branch` entry) advances to that child instead of growing
    /// a duplicate; otherwise the new node becomes `next` when the slot is
    /// free and a `branch` alternative when it is not.
    pub fn advance_with(&mut self, mv: Move, position: P) -> NodeId {
        if let Some(existing) = self.child_by_move(self.current, mv) {
            self.current = existing;
            return existing;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(GameNode {
            position,
            mv: Some(mv),
            prev: Some(self.current),
            next: None,
            branch: Vec::new(),
        });
        let parent = &mut self.nodes[self.current.0 as usize];
        if parent.next.is_none() {
            parent.next = Some(id);
        } else {
            parent.branch.push(id);
        }
        self.current = id;
        id
    }

    fn child_by_move(&self, id: NodeId, mv: Move) -> Option<NodeId> {
        let node = self.node_at(id);
        node.next
            .into_iter()
            .chain(node.branch.iter().copied())
            .find(|&child| self.node_at(child).mv == Some(mv))
    }

    pub fn goto_next(&mut self) -> Result<(), NavigationError> {
        match self.current_node().next {
            Some(id) => {
                self.current = id;
                Ok(())
            }
            None => Err(NavigationError::AtEnd),
        }
    }

    pub fn goto_prev(&mut self) -> Result<(), NavigationError> {
        match self.current_node().prev {
            Some(id) => {
                self.current = id;
                Ok(())
            }
            None => Err(NavigationError::AtStart),
        }
    }

    pub fn goto_first(&mut self) {
        self.current = NodeId::ROOT;
    }

    /// Walk `next` links to the end of the currently selected line.
    pub fn goto_last(&mut self) {
        while let Some(id) = self.current_node().next {
            self.current = id;
        }
    }

    /// Jump to any node of the tree by id; the cursor is untouched when the
    /// id is unknown.
    pub fn goto_node(&mut self, id: NodeId) -> Result<(), NavigationError> {
        if (id.0 as usize) < self.nodes.len() {
            self.current = id;
            Ok(())
        } else {
            Err(NavigationError::UnknownNode(id))
        }
    }

    /// Nodes of the main line from the root, in order.
    pub fn main_line(&self) -> impl Iterator<Item = (NodeId, &GameNode<P>)> + '_ {
        std::iter::successors(Some(NodeId::ROOT), move |&id| self.node_at(id).next)
            .map(move |id| (id, self.node_at(id)))
    }

    /// Distance of the cursor from the root along `prev` links.
    pub fn current_ply(&self) -> usize {
        let mut ply = 0;
        let mut node = self.current_node();
        while let Some(prev) = node.prev {
            ply += 1;
            node = self.node_at(prev);
        }
        ply
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
