use serde::{Deserialize, Serialize};

use super::Direction;

/// Zero-based cell coordinate in row-major order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// The neighbor one step along `direction`. Directions only point right or
    /// down, so the result never underflows; it may land out of bounds.
    pub fn step(&self, direction: Direction) -> Position {
        match direction {
            Direction::Right => Position::new(self.row, self.col + 1),
            Direction::Down => Position::new(self.row + 1, self.col),
        }
    }

    #[cfg(test)]
    /// Parse a position from a string of the form "r2c3".
    pub fn parse(s: &str) -> Self {
        let (row, col) = s[1..].split_once('c').unwrap();
        Self {
            row: row.parse().unwrap(),
            col: col.parse().unwrap(),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let pos = Position::parse("r0c0");
        assert_eq!(pos, Position::new(0, 0));

        let pos = Position::parse("r3c5");
        assert_eq!(pos, Position::new(3, 5));
    }

    #[test]
    fn test_bounds() {
        assert!(Position::new(0, 0).is_in_bounds(2));
        assert!(Position::new(1, 1).is_in_bounds(2));
        assert!(!Position::new(2, 0).is_in_bounds(2));
        assert!(!Position::new(0, 2).is_in_bounds(2));
    }

    #[test]
    fn test_step() {
        let pos = Position::new(1, 1);
        assert_eq!(pos.step(Direction::Right), Position::new(1, 2));
        assert_eq!(pos.step(Direction::Down), Position::new(2, 1));
    }
}
