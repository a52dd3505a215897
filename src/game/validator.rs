use itertools::Itertools;

use crate::model::{Grid, Position, Relation, Symbol};

fn row_symbols(grid: &Grid, row: usize) -> impl Iterator<Item = Symbol> + '_ {
    (0..grid.size()).map(move |col| grid.cell(Position::new(row, col)))
}

fn col_symbols(grid: &Grid, col: usize) -> impl Iterator<Item = Symbol> + '_ {
    (0..grid.size()).map(move |row| grid.cell(Position::new(row, col)))
}

fn firm_counts(symbols: impl Iterator<Item = Symbol>) -> (usize, usize) {
    let mut suns = 0;
    let mut moons = 0;
    for symbol in symbols {
        match symbol {
            Symbol::Sun => suns += 1,
            Symbol::Moon => moons += 1,
            _ => {}
        }
    }
    (suns, moons)
}

/// Three identical firm symbols in a row; guesses and empties break the run.
fn has_firm_triple(symbols: impl Iterator<Item = Symbol>) -> bool {
    symbols
        .tuple_windows()
        .any(|(a, b, c)| a.is_firm() && a == b && b == c)
}

/// Every edge whose both endpoints are firm must satisfy its relation. Edges
/// touching a guess or empty cell are not yet decidable and are skipped.
fn edges_satisfied(grid: &Grid) -> bool {
    grid.all_edges().all(|(from, edge)| {
        let a = grid.cell(from);
        let b = grid.cell(from.step(edge.direction));
        if !a.is_firm() || !b.is_firm() {
            return true;
        }
        match edge.relation {
            Relation::Equal => a == b,
            Relation::Different => a != b,
        }
    })
}

/// Whether a (possibly partial) grid violates no rule yet:
///
/// 1. each row holds at most N/2 suns and N/2 moons,
/// 2. each column likewise,
/// 3. no three consecutive identical firm symbols in any row or column,
/// 4. every decidable edge relation holds.
///
/// This is the cheap pruning predicate the backtracking search leans on; a
/// `true` verdict promises nothing about completability.
pub fn is_valid(grid: &Grid) -> bool {
    let half = grid.size() / 2;

    for i in 0..grid.size() {
        let (suns, moons) = firm_counts(row_symbols(grid, i));
        if suns > half || moons > half {
            return false;
        }
        let (suns, moons) = firm_counts(col_symbols(grid, i));
        if suns > half || moons > half {
            return false;
        }
        if has_firm_triple(row_symbols(grid, i)) || has_firm_triple(col_symbols(grid, i)) {
            return false;
        }
    }

    edges_satisfied(grid)
}

/// Whether the grid is a complete solution: every cell firmly filled, every
/// row and column exactly balanced, no triples, every edge relation holding.
pub fn is_solved(grid: &Grid) -> bool {
    if !grid.is_filled() {
        return false;
    }

    let half = grid.size() / 2;
    for i in 0..grid.size() {
        if firm_counts(row_symbols(grid, i)) != (half, half) {
            return false;
        }
        if firm_counts(col_symbols(grid, i)) != (half, half) {
            return false;
        }
        if has_firm_triple(row_symbols(grid, i)) || has_firm_triple(col_symbols(grid, i)) {
            return false;
        }
    }

    edges_satisfied(grid)
}
