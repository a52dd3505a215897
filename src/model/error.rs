use thiserror::Error;

use super::Position;

/// Failures raised by grid boundary operations. Positions are never clamped;
/// anything outside the grid is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {0} is out of bounds for a {1}x{1} grid")]
    OutOfBounds(Position, usize),

    #[error("no edge can run from {from} to {to}; cells must be adjacent going right or down")]
    InvalidDirection { from: Position, to: Position },
}
