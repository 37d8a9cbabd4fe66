//! Reference implementations used as test oracles.

use gridwalk_core::{AgentId, CellIndex};
use gridwalk_grid::Grid;
use proptest::prelude::*;
use std::collections::VecDeque;
use std::ops::Range;

/// Shortest hop count from `start` to `goal` by plain breadth-first search.
///
/// Uses the same blocking rule as the path finder: every cell except the
/// start must be neither a wall nor occupied. `Some(0)` when
/// `start == goal`, `None` when unreachable.
pub fn bfs_distance(grid: &Grid, start: CellIndex, goal: CellIndex) -> Option<u32> {
    if start == goal {
        return Some(0);
    }
    let mut dist: Vec<Option<u32>> = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();
    dist[start.get()] = Some(0);
    queue.push_back(start);
    while let Some(cell) = queue.pop_front() {
        let d = dist[cell.get()].unwrap_or(0);
        for &nb in grid.neighbours(cell) {
            if dist[nb.get()].is_some() || !grid.is_passable(nb) {
                continue;
            }
            if nb == goal {
                return Some(d + 1);
            }
            dist[nb.get()] = Some(d + 1);
            queue.push_back(nb);
        }
    }
    None
}

/// Strategy producing `(rows, cols, walls)` with a row-major wall mask in
/// which each cell is a wall with probability `wall_probability`.
pub fn random_layout(
    rows: Range<u32>,
    cols: Range<u32>,
    wall_probability: f64,
) -> impl Strategy<Value = (u32, u32, Vec<bool>)> {
    (rows, cols).prop_flat_map(move |(r, c)| {
        (
            Just(r),
            Just(c),
            proptest::collection::vec(
                proptest::bool::weighted(wall_probability),
                (r * c) as usize,
            ),
        )
    })
}

/// Assert that `positions[i]` holds agent `i`, that no two agents share a
/// cell, and that the occupancy map holds nobody else.
///
/// # Panics
///
/// Panics with a description of the first inconsistency found.
pub fn assert_occupancy_consistent(grid: &Grid, positions: &[CellIndex]) {
    let mut seen = vec![false; grid.cell_count()];
    for (i, &cell) in positions.iter().enumerate() {
        assert!(
            !seen[cell.get()],
            "two agents share cell {cell} ({})",
            grid.pos_of(cell)
        );
        seen[cell.get()] = true;
        assert_eq!(
            grid.occupant(cell),
            Some(AgentId(i as u32)),
            "agent {i} not recorded at {}",
            grid.pos_of(cell)
        );
        assert!(!grid.is_wall(cell), "agent {i} stands on a wall");
    }
    assert_eq!(
        grid.occupied_count(),
        positions.len(),
        "occupancy map holds cells no agent stands on"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::Pos;

    #[test]
    fn bfs_open_grid_is_manhattan() {
        let grid = Grid::open(4, 6).unwrap();
        let a = grid.index_of(Pos::new(0, 0)).unwrap();
        let b = grid.index_of(Pos::new(3, 5)).unwrap();
        assert_eq!(bfs_distance(&grid, a, b), Some(8));
    }

    #[test]
    fn bfs_blocked_by_wall_row() {
        let grid = Grid::from_layout("...\n###\n...").unwrap();
        let a = grid.index_of(Pos::new(0, 0)).unwrap();
        let b = grid.index_of(Pos::new(2, 2)).unwrap();
        assert_eq!(bfs_distance(&grid, a, b), None);
    }

    #[test]
    fn bfs_same_cell_is_zero() {
        let grid = Grid::from_layout("#").unwrap();
        assert_eq!(bfs_distance(&grid, CellIndex(0), CellIndex(0)), Some(0));
    }

    #[test]
    fn occupancy_check_accepts_consistent_state() {
        let mut grid = Grid::open(2, 2).unwrap();
        grid.occupy(CellIndex(3), AgentId(0)).unwrap();
        grid.occupy(CellIndex(1), AgentId(1)).unwrap();
        assert_occupancy_consistent(&grid, &[CellIndex(3), CellIndex(1)]);
    }

    #[test]
    #[should_panic(expected = "occupancy map holds cells")]
    fn occupancy_check_rejects_stray_occupant() {
        let mut grid = Grid::open(2, 2).unwrap();
        grid.occupy(CellIndex(0), AgentId(0)).unwrap();
        grid.occupy(CellIndex(2), AgentId(5)).unwrap();
        assert_occupancy_consistent(&grid, &[CellIndex(0)]);
    }
}
