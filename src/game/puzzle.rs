use rand::seq::IndexedRandom;
use rand::Rng;

use super::generator::{self, GenerateError};
use super::validator;
use crate::model::{Grid, GridError, Position, Symbol};

/// One playable puzzle: the working board, a pristine copy of the initial
/// clue layout, and the solved grid backing hints and give-up. This is the
/// whole surface presentation code consumes.
#[derive(Debug, Clone)]
pub struct Puzzle {
    board: Grid,
    initial: Grid,
    solution: Grid,
}

impl Puzzle {
    pub fn generate(size: usize, seed: Option<u64>) -> Result<Self, GenerateError> {
        let generated = generator::generate_puzzle(size, seed)?;
        Ok(Self::new(generated.puzzle, generated.solution))
    }

    /// Assemble a puzzle from a clue grid and its solved counterpart.
    pub fn new(board: Grid, solution: Grid) -> Self {
        Self {
            initial: board.clone(),
            board,
            solution,
        }
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    pub fn solution(&self) -> &Grid {
        &self.solution
    }

    pub fn symbol_at(&self, pos: Position) -> Result<Symbol, GridError> {
        self.board.get_symbol(pos)
    }

    /// Players may set firm symbols or guess annotations alike; the solved
    /// check only ever credits firm ones.
    pub fn set_symbol_at(&mut self, pos: Position, symbol: Symbol) -> Result<(), GridError> {
        self.board.set_symbol(pos, symbol)
    }

    pub fn is_solved(&self) -> bool {
        validator::is_solved(&self.board)
    }

    /// Reveal one uniformly random cell where the board disagrees with the
    /// solution, writing the solved symbol in place. `None` when every cell
    /// already matches.
    pub fn hint(&mut self) -> Option<Position> {
        self.hint_with(&mut rand::rng())
    }

    pub fn hint_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        let mismatched: Vec<Position> = self
            .board
            .positions()
            .filter(|&pos| self.board.cell(pos) != self.solution.cell(pos))
            .collect();

        let pos = *mismatched.choose(rng)?;
        self.board.set_cell(pos, self.solution.cell(pos));
        Some(pos)
    }

    /// Put the board back to the initial clue layout.
    pub fn reset(&mut self) {
        self.board = self.initial.clone();
    }

    /// Give up: replace the board with the solution.
    pub fn reveal_solution(&mut self) {
        self.board = self.solution.clone();
    }
}
