use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;

use super::{solver, validator};
use crate::model::{Direction, Edge, Grid, Position, Relation, Symbol};

/// The generation pipeline reached a state it assumes impossible. Fatal for
/// this attempt; callers may retry with a different seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("puzzle generation invariant violated: {0}")]
pub struct GenerateError(&'static str);

/// A freshly generated puzzle (minimal clues plus the reduced edge set) and
/// the unique solution backing hints and give-up.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub puzzle: Grid,
    pub solution: Grid,
}

/// Build a publishable puzzle:
///
/// 1. backtrack a random complete filling,
/// 2. derive the full edge set from it,
/// 3. clear the board and seed one random symbol,
/// 4. greedily drop edges while exactly one solution remains,
/// 5. greedily drop clue symbols while the board stays solvable by pure
///    deduction.
///
/// The result is guaranteed deduction-solvable; failing that is a generation
/// bug surfaced as `GenerateError`, never a user-facing condition.
pub fn generate_puzzle(size: usize, seed: Option<u64>) -> Result<GeneratedPuzzle, GenerateError> {
    let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
    let mut rng = StdRng::seed_from_u64(seed);
    info!(target: "generator", "generating {}x{} puzzle with seed {}", size, size, seed);

    let mut grid = Grid::new(size);
    while !fill_symbols(&mut grid, 0, &mut rng) {
        // a fresh even-sized grid always admits a filling
        warn!(target: "generator", "randomized fill came up empty, retrying");
        grid.clear();
    }
    trace!(target: "generator", "filled grid: {:?}", grid);

    derive_edges(&mut grid);

    grid.clear();
    let seed_pos = Position::new(rng.random_range(0..size), rng.random_range(0..size));
    let seed_symbol = if rng.random_bool(0.5) {
        Symbol::Sun
    } else {
        Symbol::Moon
    };
    grid.set_cell(seed_pos, seed_symbol);
    trace!(target: "generator", "seeded {} at {}", seed_symbol, seed_pos);

    reduce_edges(&mut grid, &mut rng);
    reduce_clues(&mut grid, &mut rng)?;

    if !solver::is_intuitively_solvable(&mut grid) {
        return Err(GenerateError("finished puzzle is not solvable by deduction"));
    }

    let mut solution = grid.clone();
    if !solver::solve(&mut solution) {
        return Err(GenerateError("finished puzzle has no solution"));
    }

    let n_clues = grid.positions().filter(|&pos| grid.cell(pos).is_firm()).count();
    info!(
        target: "generator",
        "done: {} edges and {} clues survive\n{:?}",
        grid.edge_count(),
        n_clues,
        grid
    );

    Ok(GeneratedPuzzle {
        puzzle: grid,
        solution,
    })
}

/// The solver's backtracking walk, except the symbol try-order is shuffled
/// per cell so each run lands on a different filling.
fn fill_symbols(grid: &mut Grid, depth: usize, rng: &mut StdRng) -> bool {
    if depth == grid.size() * grid.size() {
        return validator::is_solved(grid);
    }

    let pos = Position::new(depth / grid.size(), depth % grid.size());

    let mut choices = [Symbol::Sun, Symbol::Moon];
    choices.shuffle(rng);
    for symbol in choices {
        grid.set_cell(pos, symbol);
        if validator::is_valid(grid) && fill_symbols(grid, depth + 1, rng) {
            return true;
        }
    }

    grid.set_cell(pos, Symbol::Empty);
    false
}

/// Give every adjacent pair the edge the filled grid satisfies: `Equal` where
/// the symbols match, `Different` otherwise. Produces all 2·N·(N−1) edges.
fn derive_edges(grid: &mut Grid) {
    for pos in grid.positions().collect::<Vec<_>>() {
        for direction in [Direction::Right, Direction::Down] {
            let neighbor = pos.step(direction);
            if !neighbor.is_in_bounds(grid.size()) {
                continue;
            }
            let relation = if grid.cell(pos) == grid.cell(neighbor) {
                Relation::Equal
            } else {
                Relation::Different
            };
            grid.insert_edge(pos, Edge::new(direction, relation));
        }
    }
}

/// Greedy edge minimization: shuffle the surviving edges, commit the first
/// one whose removal keeps the solution unique (re-adding every failure),
/// and rescan. Stops when a whole pass finds nothing removable or the
/// removal budget runs dry. First success beats best success, so the shuffle
/// order shapes the outcome.
fn reduce_edges(grid: &mut Grid, rng: &mut StdRng) {
    let mut remaining: Vec<(Position, Edge)> = grid.all_edges().collect();
    let mut budget = remaining.len();

    loop {
        remaining.shuffle(rng);

        let mut removed = None;
        for (idx, &(pos, edge)) in remaining.iter().enumerate() {
            grid.delete_edge(pos, edge.direction);
            if solver::count_solutions(grid) == 1 {
                removed = Some(idx);
                break;
            }
            grid.insert_edge(pos, edge);
        }

        let Some(idx) = removed else {
            trace!(
                target: "generator",
                "edge reduction settled with {} edges left",
                remaining.len()
            );
            return;
        };
        remaining.swap_remove(idx);

        if budget == 0 {
            return;
        }
        budget -= 1;
    }
}

/// Clue minimization. A grid the deduction solver already cracks needs no
/// clues beyond its seed. Otherwise solve it outright, then keep removing
/// whichever randomly-ordered symbol still leaves the board
/// deduction-solvable, until a pass removes nothing.
fn reduce_clues(grid: &mut Grid, rng: &mut StdRng) -> Result<(), GenerateError> {
    if solver::is_intuitively_solvable(grid) {
        return Ok(());
    }

    if !solver::solve(grid) {
        return Err(GenerateError("edge-reduced grid lost its seeded solution"));
    }

    let mut positions: Vec<Position> = grid.positions().collect();
    positions.shuffle(rng);

    for _ in 0..grid.size() * grid.size() {
        let mut removed = None;
        for (idx, &pos) in positions.iter().enumerate() {
            let symbol = grid.cell(pos);
            if symbol == Symbol::Empty {
                continue;
            }

            grid.set_cell(pos, Symbol::Empty);
            if solver::is_intuitively_solvable(grid) {
                removed = Some(idx);
                break;
            }
            grid.set_cell(pos, symbol);
        }

        match removed {
            Some(idx) => {
                positions.swap_remove(idx);
            }
            // every committed state was verified deduction-solvable
            None => return Ok(()),
        }
    }

    Err(GenerateError(
        "clue reduction never converged on a deduction-solvable grid",
    ))
}
