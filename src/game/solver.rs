use log::trace;

use super::validator;
use crate::model::{Grid, Position, Symbol};

// All three search routines walk cells in the same fixed row-major order and
// share one grid, mutating it in place. Every failing path undoes its own
// writes before returning; callers rely on that restore contract.

fn position_at(grid: &Grid, depth: usize) -> Position {
    Position::new(depth / grid.size(), depth % grid.size())
}

/// Fill the grid's empty cells with a complete solution via backtracking.
/// Returns true and leaves the solution in place on success; returns false
/// and leaves the grid's symbols untouched when no solution extends the
/// current firm cells.
pub fn solve(grid: &mut Grid) -> bool {
    solve_from(grid, 0)
}

fn solve_from(grid: &mut Grid, depth: usize) -> bool {
    if depth == grid.size() * grid.size() {
        return validator::is_solved(grid);
    }

    let pos = position_at(grid, depth);

    // pre-seeded clues are validated but never reassigned
    if grid.cell(pos).is_firm() {
        if !validator::is_valid(grid) {
            return false;
        }
        return solve_from(grid, depth + 1);
    }

    for symbol in [Symbol::Sun, Symbol::Moon] {
        grid.set_cell(pos, symbol);
        if validator::is_valid(grid) && solve_from(grid, depth + 1) {
            return true;
        }
    }

    grid.set_cell(pos, Symbol::Empty);
    false
}

/// Count every complete solution reachable from the current firm cells. The
/// grid is restored to its pre-call state before returning; this exists to
/// test uniqueness, not to extract a solution.
pub fn count_solutions(grid: &mut Grid) -> usize {
    count_from(grid, 0)
}

fn count_from(grid: &mut Grid, depth: usize) -> usize {
    if depth == grid.size() * grid.size() {
        return usize::from(validator::is_solved(grid));
    }

    let pos = position_at(grid, depth);

    if grid.cell(pos).is_firm() {
        if !validator::is_valid(grid) {
            return 0;
        }
        return count_from(grid, depth + 1);
    }

    let mut total = 0;
    for symbol in [Symbol::Sun, Symbol::Moon] {
        grid.set_cell(pos, symbol);
        if validator::is_valid(grid) {
            total += count_from(grid, depth + 1);
        }
    }

    grid.set_cell(pos, Symbol::Empty);
    total
}

/// Whether the grid can be completed by forced deductions alone, never
/// guessing.
///
/// One pass visits every empty cell and tests each candidate against
/// full-grid validity: a candidate that invalidates the grid forces its
/// complement, which is committed for the rest of the pass. A pass that
/// places nothing means a human would have to guess, so the answer is no;
/// otherwise the now-fuller grid is checked recursively. Every commitment is
/// reverted before returning, leaving the caller's filled/empty pattern
/// exactly as it was.
pub fn is_intuitively_solvable(grid: &mut Grid) -> bool {
    if grid.is_filled() {
        return validator::is_solved(grid);
    }
    // adding symbols to an invalid grid only ever yields more invalid grids
    if !validator::is_valid(grid) {
        return false;
    }

    let mut placed = Vec::new();
    for pos in grid.positions() {
        if grid.cell(pos) != Symbol::Empty {
            continue;
        }

        grid.set_cell(pos, Symbol::Sun);
        if !validator::is_valid(grid) {
            grid.set_cell(pos, Symbol::Moon);
            placed.push(pos);
            continue;
        }

        grid.set_cell(pos, Symbol::Moon);
        if !validator::is_valid(grid) {
            grid.set_cell(pos, Symbol::Sun);
            placed.push(pos);
            continue;
        }

        grid.set_cell(pos, Symbol::Empty);
    }

    if placed.is_empty() {
        return false;
    }
    trace!(target: "solver", "deduction pass forced {} cells", placed.len());

    let result = is_intuitively_solvable(grid);

    for pos in placed {
        grid.set_cell(pos, Symbol::Empty);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Relation;

    #[test]
    fn test_solve_empty_two_by_two() {
        let mut grid = Grid::new(2);
        assert!(solve(&mut grid));
        assert!(validator::is_solved(&grid));

        // sun is tried first, so the search lands on this checkerboard
        let expected = Grid::parse(
            2,
            "\
S M

M S",
        );
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_two_by_two_has_exactly_two_solutions() {
        let mut grid = Grid::new(2);
        assert_eq!(count_solutions(&mut grid), 2);
    }

    #[test]
    fn test_empty_grid_solution_counts() {
        // full enumerations of every balanced, triple-free filling
        let mut grid = Grid::new(4);
        assert_eq!(count_solutions(&mut grid), 90);

        let mut grid = Grid::new(6);
        assert_eq!(count_solutions(&mut grid), 11222);
    }

    #[test]
    fn test_count_solutions_restores_the_grid() {
        let mut grid = Grid::parse(
            4,
            "\
S . . .
  x
. .=M .",
        );
        let before = grid.clone();
        assert!(count_solutions(&mut grid) > 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_solve_keeps_seeded_clues() {
        let mut grid = Grid::new(2);
        grid.set_symbol(Position::new(0, 0), Symbol::Moon).unwrap();

        assert!(solve(&mut grid));
        assert_eq!(grid.get_symbol(Position::new(0, 0)).unwrap(), Symbol::Moon);
        assert!(validator::is_solved(&grid));
    }

    #[test]
    fn test_failed_solve_restores_the_grid() {
        // an equal edge inside a two-cell row can never balance
        let mut grid = Grid::new(2);
        grid.add_edge(Position::new(0, 0), Position::new(0, 1), Relation::Equal)
            .unwrap();
        let before = grid.clone();

        assert!(!solve(&mut grid));
        assert_eq!(grid, before);
        assert_eq!(count_solutions(&mut grid), 0);
    }

    #[test]
    fn test_single_seed_forces_two_by_two() {
        let mut grid = Grid::parse(
            2,
            "\
S .",
        );
        let before = grid.clone();

        assert!(is_intuitively_solvable(&mut grid));
        // the verdict must not disturb the filled/empty pattern
        assert_eq!(grid, before);
    }

    #[test]
    fn test_empty_grid_needs_guessing() {
        let mut grid = Grid::new(2);
        assert!(!is_intuitively_solvable(&mut grid));

        // solvable by search, but no single cell is ever forced
        let mut grid = Grid::parse(
            4,
            "\
S . . .",
        );
        assert!(solve(&mut grid.clone()));
        assert!(!is_intuitively_solvable(&mut grid));
    }

    #[test]
    fn test_invalid_grid_is_not_deducible() {
        let mut grid = Grid::parse(
            2,
            "\
S S",
        );
        assert!(!is_intuitively_solvable(&mut grid));
    }

    #[test]
    fn test_filled_grid_verdict_matches_is_solved() {
        let mut solved = Grid::parse(
            2,
            "\
S M

M S",
        );
        assert!(is_intuitively_solvable(&mut solved));

        let mut broken = Grid::parse(
            2,
            "\
S S

M M",
        );
        assert!(!is_intuitively_solvable(&mut broken));
    }
}
