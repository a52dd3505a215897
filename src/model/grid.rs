use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{Direction, Edge, GridError, Position, Relation, Symbol};

pub const MAX_GRID_SIZE: usize = 8;

/// The playing field: an N×N symbol array plus the constraint-edge map.
///
/// Edges are stored once per adjacent pair, anchored at the upper/left cell and
/// pointing right or down. The map is ordered so edge iteration is
/// deterministic, which keeps seeded generation reproducible.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: [[Symbol; MAX_GRID_SIZE]; MAX_GRID_SIZE],
    // struct-keyed, so serialized as an entry list rather than a map
    #[serde_as(as = "Vec<(_, _)>")]
    edges: BTreeMap<Position, BTreeSet<Edge>>,
}

impl Grid {
    /// Create an empty grid. The size must be even for the balance rules to be
    /// satisfiable.
    pub fn new(size: usize) -> Self {
        assert!(
            size >= 2 && size % 2 == 0,
            "grid size must be even and at least 2, got {}",
            size
        );
        assert!(
            size <= MAX_GRID_SIZE,
            "grid size must be <= {}, got {}",
            MAX_GRID_SIZE,
            size
        );

        Self {
            size,
            cells: [[Symbol::Empty; MAX_GRID_SIZE]; MAX_GRID_SIZE],
            edges: BTreeMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn check_bounds(&self, pos: Position) -> Result<(), GridError> {
        if pos.is_in_bounds(self.size) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds(pos, self.size))
        }
    }

    pub fn get_symbol(&self, pos: Position) -> Result<Symbol, GridError> {
        self.check_bounds(pos)?;
        Ok(self.cells[pos.row][pos.col])
    }

    pub fn set_symbol(&mut self, pos: Position, symbol: Symbol) -> Result<(), GridError> {
        self.check_bounds(pos)?;
        self.cells[pos.row][pos.col] = symbol;
        Ok(())
    }

    /// Read a cell the search loops already know to be in bounds.
    pub(crate) fn cell(&self, pos: Position) -> Symbol {
        self.cells[pos.row][pos.col]
    }

    pub(crate) fn set_cell(&mut self, pos: Position, symbol: Symbol) {
        self.cells[pos.row][pos.col] = symbol;
    }

    /// Add a constraint edge between two adjacent cells. The edge is anchored
    /// at `from`, so `to` must be exactly one step right or down of it; an edge
    /// already stored in that direction is replaced.
    pub fn add_edge(&mut self, from: Position, to: Position, relation: Relation) -> Result<(), GridError> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        let direction =
            Direction::between(from, to).ok_or(GridError::InvalidDirection { from, to })?;
        self.insert_edge(from, Edge::new(direction, relation));
        Ok(())
    }

    /// Remove the edge anchored at `from` in `direction`; a no-op when no such
    /// edge is stored.
    pub fn remove_edge(&mut self, from: Position, direction: Direction) -> Result<(), GridError> {
        self.check_bounds(from)?;
        self.delete_edge(from, direction);
        Ok(())
    }

    pub(crate) fn insert_edge(&mut self, from: Position, edge: Edge) {
        self.delete_edge(from, edge.direction);
        self.edges.entry(from).or_default().insert(edge);
    }

    pub(crate) fn delete_edge(&mut self, from: Position, direction: Direction) {
        if let Some(set) = self.edges.get_mut(&from) {
            set.retain(|edge| edge.direction != direction);
            // drop emptied entries so grid equality stays structural
            if set.is_empty() {
                self.edges.remove(&from);
            }
        }
    }

    pub fn edges_at(&self, pos: Position) -> impl Iterator<Item = Edge> + '_ {
        self.edges.get(&pos).into_iter().flatten().copied()
    }

    /// Every stored edge with its anchor cell, in deterministic order.
    pub fn all_edges(&self) -> impl Iterator<Item = (Position, Edge)> + '_ {
        self.edges
            .iter()
            .flat_map(|(pos, set)| set.iter().map(move |edge| (*pos, *edge)))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|set| set.len()).sum()
    }

    /// All cell positions in row-major order, the order every search visits
    /// them in.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// True iff every cell holds a firm symbol. Guess annotations count as
    /// unfilled.
    pub fn is_filled(&self) -> bool {
        self.positions().all(|pos| self.cell(pos).is_firm())
    }

    /// Reset every cell to `Empty`, keeping the edges.
    pub fn clear(&mut self) {
        for row in 0..self.size {
            for col in 0..self.size {
                self.cells[row][col] = Symbol::Empty;
            }
        }
    }

    fn edge_glyph(&self, pos: Position, direction: Direction) -> char {
        self.edges_at(pos)
            .find(|edge| edge.direction == direction)
            .map(|edge| edge.relation.glyph())
            .unwrap_or(' ')
    }

    #[cfg(test)]
    /// Parse the `Debug` rendering back into a grid: symbol rows interleaved
    /// with down-edge rows, cell `j` at character `2 * j`. Short or missing
    /// lines read as empty cells with no edges, so sparse boards stay terse.
    pub fn parse(size: usize, input: &str) -> Self {
        let mut grid = Grid::new(size);
        let lines: Vec<Vec<char>> = input.lines().map(|line| line.chars().collect()).collect();

        let char_at = |line: usize, idx: usize| -> char {
            lines
                .get(line)
                .and_then(|chars| chars.get(idx))
                .copied()
                .unwrap_or(' ')
        };

        for row in 0..size {
            for col in 0..size {
                let pos = Position::new(row, col);
                let symbol = match char_at(2 * row, 2 * col) {
                    ' ' => Symbol::Empty,
                    glyph => Symbol::from_glyph(glyph)
                        .unwrap_or_else(|| panic!("bad symbol glyph {:?} at {}", glyph, pos)),
                };
                grid.set_cell(pos, symbol);

                for (direction, glyph) in [
                    (Direction::Right, char_at(2 * row, 2 * col + 1)),
                    (Direction::Down, char_at(2 * row + 1, 2 * col)),
                ] {
                    let relation = match glyph {
                        '=' => Some(Relation::Equal),
                        'x' => Some(Relation::Different),
                        _ => None,
                    };
                    if let Some(relation) = relation {
                        grid.insert_edge(pos, Edge::new(direction, relation));
                    }
                }
            }
        }
        grid
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = String::new();
        output.push('\n');

        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Position::new(row, col);
                output.push(self.cell(pos).glyph());
                if col + 1 < self.size {
                    output.push(self.edge_glyph(pos, Direction::Right));
                }
            }
            output.push('\n');

            if row + 1 < self.size {
                for col in 0..self.size {
                    output.push(self.edge_glyph(Position::new(row, col), Direction::Down));
                    if col + 1 < self.size {
                        output.push(' ');
                    }
                }
                output.push('\n');
            }
        }

        write!(f, "{}", output)
    }
}
