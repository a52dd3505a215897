use serde::{Deserialize, Serialize};

use super::Position;

/// Orientation of a stored constraint edge. Edges are kept once per adjacent
/// pair, anchored at the upper/left cell, so only these two directions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Direction {
    Right,
    Down,
}

impl Direction {
    /// Direction from `from` to an adjacent `to`, if `to` is exactly one step
    /// right or down. Anything else (including up/left) has no canonical form.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        if to.row == from.row && to.col == from.col + 1 {
            Some(Direction::Right)
        } else if to.row == from.row + 1 && to.col == from.col {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Required relationship between the two cells an edge connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Relation {
    Equal,
    Different,
}

impl Relation {
    pub fn glyph(&self) -> char {
        match self {
            Relation::Equal => '=',
            Relation::Different => 'x',
        }
    }
}

/// A constraint edge as stored on its anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Edge {
    pub direction: Direction,
    pub relation: Relation,
}

impl Edge {
    pub fn new(direction: Direction, relation: Relation) -> Self {
        Self {
            direction,
            relation,
        }
    }
}
