pub mod generator;
pub mod puzzle;
pub mod solver;
pub mod validator;

pub use generator::{generate_puzzle, GenerateError, GeneratedPuzzle};
pub use puzzle::Puzzle;
