mod edge;
mod error;
mod grid;
mod position;
mod symbol;

pub use edge::{Direction, Edge, Relation};
pub use error::GridError;
pub use grid::{Grid, MAX_GRID_SIZE};
pub use position::Position;
pub use symbol::Symbol;
