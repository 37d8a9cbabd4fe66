//! A* search over a [`Grid`].
//!
//! Unit edge cost, 4-connectivity, Manhattan heuristic. Walls and cells
//! occupied by any agent are impassable. Because the heuristic is
//! consistent, the returned path is always a shortest one.
//!
//! Tie-breaking is fixed: the open cell with the lowest `f` is expanded
//! next, and among equal `f` the one that entered the open set first wins.
//! Neighbours are visited in the grid's up, down, left, right order. Same
//! grid, same occupancy, same endpoints: same path, cell for cell.

use crate::scratch::{NodeState, Scores, SearchScratch};
use gridwalk_core::{CellIndex, Pos};
use gridwalk_grid::Grid;

/// Manhattan distance between two cells.
#[inline]
pub fn heuristic(a: Pos, b: Pos) -> u32 {
    a.manhattan(b)
}

/// Counters from the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells taken off the open set (including the goal, if reached).
    pub expanded: u32,
    /// Distinct cells that entered the open set, including the start.
    pub discovered: u32,
    /// Cells in the returned path; zero when no path exists.
    pub path_len: usize,
}

impl SearchStats {
    /// Whether the search reached its goal.
    pub fn found(&self) -> bool {
        self.path_len > 0
    }
}

/// Reusable A* path finder.
///
/// Holds the scratch arrays between searches so repeated per-turn
/// replanning does not reallocate. Scratch is reset at the start of every
/// [`find_path`](Self::find_path).
///
/// # Examples
///
/// ```
/// use gridwalk_core::Pos;
/// use gridwalk_grid::Grid;
/// use gridwalk_search::PathFinder;
///
/// let grid = Grid::open(5, 5).unwrap();
/// let start = grid.index_of(Pos::new(0, 0)).unwrap();
/// let goal = grid.index_of(Pos::new(4, 4)).unwrap();
///
/// let mut finder = PathFinder::new();
/// let path = finder.find_path(&grid, start, goal);
/// assert_eq!(path.len(), 9);
/// assert_eq!(path.first(), Some(&start));
/// assert_eq!(path.last(), Some(&goal));
/// ```
#[derive(Debug, Default)]
pub struct PathFinder {
    scratch: SearchScratch,
    stats: SearchStats,
}

impl PathFinder {
    /// Create a path finder. Scratch is sized on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path finder with scratch pre-sized for `cell_count` cells.
    pub fn with_capacity(cell_count: usize) -> Self {
        Self {
            scratch: SearchScratch::with_capacity(cell_count),
            stats: SearchStats::default(),
        }
    }

    /// Shortest path from `start` to `goal`, both inclusive.
    ///
    /// Returns `[start]` when `start == goal` and an empty vector when the
    /// goal cannot be reached. The start cell itself is never checked for
    /// walls or occupancy; the searching agent normally stands on it.
    /// Every other cell on the path is free of walls and agents.
    ///
    /// Both indices must come from `grid`. Indices from another grid are a
    /// contract violation, caught by a debug assertion and otherwise
    /// reported as a panic on slice access.
    pub fn find_path(&mut self, grid: &Grid, start: CellIndex, goal: CellIndex) -> Vec<CellIndex> {
        debug_assert!(
            start.get() < grid.cell_count() && goal.get() < grid.cell_count(),
            "cell index out of range for {}x{} grid",
            grid.rows(),
            grid.cols()
        );
        self.reset_search_state(grid.cell_count());

        let goal_pos = grid.pos_of(goal);
        let h = heuristic(grid.pos_of(start), goal_pos);
        self.scratch.relax(start, Scores { g: 0, h, f: h }, None);
        self.stats.discovered = 1;

        while let Some(current) = self.scratch.pop_min() {
            self.stats.expanded += 1;
            if current == goal {
                let path = self.scratch.reconstruct(goal);
                self.stats.path_len = path.len();
                tracing::trace!(
                    expanded = self.stats.expanded,
                    discovered = self.stats.discovered,
                    path_len = path.len(),
                    "path found"
                );
                return path;
            }
            self.scratch.close(current);

            let tentative_g = self.scratch.scores(current).g + 1;
            for &next in grid.neighbours(current) {
                if self.scratch.state(next) == NodeState::Closed
                    || grid.is_wall(next)
                    || grid.is_occupied(next)
                {
                    continue;
                }
                let is_open = self.scratch.state(next) == NodeState::Open;
                if !is_open || tentative_g < self.scratch.scores(next).g {
                    let h = heuristic(grid.pos_of(next), goal_pos);
                    let scores = Scores {
                        g: tentative_g,
                        h,
                        f: tentative_g + h,
                    };
                    self.scratch.relax(next, scores, Some(current));
                    if !is_open {
                        self.stats.discovered += 1;
                    }
                }
            }
        }

        tracing::trace!(
            expanded = self.stats.expanded,
            discovered = self.stats.discovered,
            "no path"
        );
        Vec::new()
    }

    /// Zero all scores and back-pointers and clear the statistics.
    ///
    /// [`find_path`](Self::find_path) calls this itself before searching.
    pub fn reset_search_state(&mut self, cell_count: usize) {
        self.scratch.reset(cell_count);
        self.stats = SearchStats::default();
    }

    /// Counters from the most recent search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Scores assigned to `cell` by the most recent search, or `None` if
    /// that search never reached it.
    pub fn scores(&self, cell: CellIndex) -> Option<Scores> {
        if cell.get() >= self.scratch.len()
            || self.scratch.state(cell) == NodeState::Unseen
        {
            return None;
        }
        Some(self.scratch.scores(cell))
    }

    /// Read-only view of the scratch left by the most recent search.
    pub fn scratch(&self) -> &SearchScratch {
        &self.scratch
    }
}

/// One-shot search with a fresh [`PathFinder`].
pub fn find_path(grid: &Grid, start: CellIndex, goal: CellIndex) -> Vec<CellIndex> {
    PathFinder::with_capacity(grid.cell_count()).find_path(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::AgentId;
    use gridwalk_test_utils::{bfs_distance, random_layout};
    use proptest::prelude::*;

    fn idx(grid: &Grid, row: u32, col: u32) -> CellIndex {
        grid.index_of(Pos::new(row, col)).unwrap()
    }

    fn positions(grid: &Grid, path: &[CellIndex]) -> Vec<(u32, u32)> {
        path.iter()
            .map(|&c| {
                let p = grid.pos_of(c);
                (p.row, p.col)
            })
            .collect()
    }

    // ── Basic contract ──────────────────────────────────────────

    #[test]
    fn open_5x5_corner_to_corner() {
        let grid = Grid::open(5, 5).unwrap();
        let mut finder = PathFinder::new();
        let path = finder.find_path(&grid, idx(&grid, 0, 0), idx(&grid, 4, 4));
        assert_eq!(path.len(), 9);
        // g climbs by exactly one per step.
        for (step, &cell) in path.iter().enumerate() {
            assert_eq!(finder.scores(cell).unwrap().g, step as u32);
        }
        for pair in path.windows(2) {
            assert_eq!(grid.pos_of(pair[0]).manhattan(grid.pos_of(pair[1])), 1);
        }
    }

    #[test]
    fn start_equals_goal_is_single_cell() {
        let grid = Grid::open(3, 3).unwrap();
        let c = idx(&grid, 1, 1);
        let mut finder = PathFinder::new();
        assert_eq!(finder.find_path(&grid, c, c), vec![c]);
        assert_eq!(finder.stats().expanded, 1);
    }

    #[test]
    fn walled_isolated_goal_is_unreachable() {
        let grid = Grid::from_layout(
            "
            .....
            ..#..
            .###.
            ..#..
            ",
        )
        .unwrap();
        let goal = idx(&grid, 2, 2);
        let mut finder = PathFinder::new();
        assert!(finder.find_path(&grid, idx(&grid, 0, 0), goal).is_empty());
        assert!(!finder.stats().found());
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let grid = Grid::from_layout(
            "
            .....
            .###.
            .#.#.
            .###.
            ",
        )
        .unwrap();
        assert!(find_path(&grid, idx(&grid, 0, 0), idx(&grid, 2, 2)).is_empty());
    }

    #[test]
    fn occupied_goal_is_unreachable() {
        let mut grid = Grid::open(3, 3).unwrap();
        let goal = idx(&grid, 2, 2);
        grid.occupy(goal, AgentId(1)).unwrap();
        assert!(find_path(&grid, idx(&grid, 0, 0), goal).is_empty());
    }

    #[test]
    fn occupied_start_is_ignored() {
        let mut grid = Grid::open(1, 3).unwrap();
        let start = idx(&grid, 0, 0);
        grid.occupy(start, AgentId(0)).unwrap();
        assert_eq!(find_path(&grid, start, idx(&grid, 0, 2)).len(), 3);
    }

    #[test]
    fn agents_block_like_walls() {
        let mut grid = Grid::open(3, 3).unwrap();
        // Block the middle column except the bottom row.
        grid.occupy(idx(&grid, 0, 1), AgentId(1)).unwrap();
        grid.occupy(idx(&grid, 1, 1), AgentId(2)).unwrap();
        let path = find_path(&grid, idx(&grid, 0, 0), idx(&grid, 0, 2));
        assert_eq!(
            positions(&grid, &path),
            vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]
        );
    }

    // ── Tie-breaking ────────────────────────────────────────────

    #[test]
    fn ties_prefer_vertical_first() {
        let grid = Grid::open(5, 5).unwrap();
        let path = find_path(&grid, idx(&grid, 0, 0), idx(&grid, 4, 4));
        assert_eq!(
            positions(&grid, &path),
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (3, 0),
                (4, 0),
                (4, 1),
                (4, 2),
                (4, 3),
                (4, 4)
            ]
        );
    }

    #[test]
    fn ties_upward_search() {
        let grid = Grid::open(3, 3).unwrap();
        let path = find_path(&grid, idx(&grid, 2, 2), idx(&grid, 0, 0));
        assert_eq!(
            positions(&grid, &path),
            vec![(2, 2), (1, 2), (0, 2), (0, 1), (0, 0)]
        );
    }

    #[test]
    fn detour_around_wall_bar() {
        let grid = Grid::from_layout(
            "
            .....
            .###.
            .....
            ",
        )
        .unwrap();
        let path = find_path(&grid, idx(&grid, 1, 0), idx(&grid, 1, 4));
        assert_eq!(
            positions(&grid, &path),
            vec![(1, 0), (0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 4)]
        );
    }

    #[test]
    fn repeated_searches_are_identical() {
        let grid = Grid::from_layout(
            "
            ..#....
            ..#.##.
            ....#..
            .##...#
            .......
            ",
        )
        .unwrap();
        let mut finder = PathFinder::new();
        let (s, g) = (idx(&grid, 0, 0), idx(&grid, 0, 6));
        let first = finder.find_path(&grid, s, g);
        let first_stats = finder.stats();
        // A search between other endpoints must not disturb the next one.
        let _ = finder.find_path(&grid, idx(&grid, 4, 6), idx(&grid, 0, 1));
        let second = finder.find_path(&grid, s, g);
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first_stats, finder.stats());
    }

    #[test]
    fn scores_none_for_unreached_cells() {
        let grid = Grid::from_layout("..#..").unwrap();
        let mut finder = PathFinder::new();
        assert!(finder
            .find_path(&grid, idx(&grid, 0, 0), idx(&grid, 0, 4))
            .is_empty());
        assert!(finder.scores(idx(&grid, 0, 1)).is_some());
        assert!(finder.scores(idx(&grid, 0, 3)).is_none());
    }

    #[test]
    fn non_square_grid_reaches_far_column() {
        let grid = Grid::open(2, 7).unwrap();
        let path = find_path(&grid, idx(&grid, 1, 0), idx(&grid, 0, 6));
        assert_eq!(path.len(), 8);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn path_length_matches_bfs(
            (rows, cols, walls) in random_layout(1..9, 1..9, 0.3),
            sr in 0u32..9, sc in 0u32..9,
            gr in 0u32..9, gc in 0u32..9,
        ) {
            let grid = Grid::from_mask(rows, cols, &walls).unwrap();
            let start = idx(&grid, sr % rows, sc % cols);
            let goal = idx(&grid, gr % rows, gc % cols);
            let path = find_path(&grid, start, goal);
            match bfs_distance(&grid, start, goal) {
                Some(d) => {
                    prop_assert_eq!(path.len(), d as usize + 1);
                    prop_assert_eq!(path[0], start);
                    prop_assert_eq!(*path.last().unwrap(), goal);
                    for pair in path.windows(2) {
                        prop_assert!(grid.neighbours(pair[0]).contains(&pair[1]));
                        prop_assert!(grid.is_passable(pair[1]));
                    }
                }
                None => prop_assert!(path.is_empty()),
            }
        }

        #[test]
        fn occupied_grid_matches_bfs_and_list_search(
            (rows, cols, walls) in random_layout(1..10, 1..10, 0.25),
            sr in 0u32..10, sc in 0u32..10,
            gr in 0u32..10, gc in 0u32..10,
            agents in proptest::collection::vec((0u32..10, 0u32..10), 0..6),
        ) {
            let mut grid = Grid::from_mask(rows, cols, &walls).unwrap();
            let start = idx(&grid, sr % rows, sc % cols);
            let goal = idx(&grid, gr % rows, gc % cols);
            for (n, &(r, c)) in agents.iter().enumerate() {
                let cell = idx(&grid, r % rows, c % cols);
                if cell != start && grid.is_passable(cell) {
                    grid.occupy(cell, AgentId(n as u32 + 1)).unwrap();
                }
            }

            let path = find_path(&grid, start, goal);
            prop_assert_eq!(&path, &list_search(&grid, start, goal));
            match bfs_distance(&grid, start, goal) {
                Some(d) => {
                    prop_assert_eq!(path.len(), d as usize + 1);
                    for &cell in &path[1..] {
                        prop_assert!(!grid.is_occupied(cell));
                    }
                }
                None => prop_assert!(path.is_empty()),
            }
        }
    }

    /// A* over an insertion-ordered open list, taking the leftmost
    /// minimum-`f` entry each round. Slow but obviously ordered.
    fn list_search(grid: &Grid, start: CellIndex, goal: CellIndex) -> Vec<CellIndex> {
        let n = grid.cell_count();
        let goal_pos = grid.pos_of(goal);
        let mut g = vec![0u32; n];
        let mut f = vec![0u32; n];
        let mut previous: Vec<Option<CellIndex>> = vec![None; n];
        let mut closed = vec![false; n];
        let mut open = vec![start];
        f[start.get()] = heuristic(grid.pos_of(start), goal_pos);

        while !open.is_empty() {
            let mut best = 0;
            for (i, cell) in open.iter().enumerate() {
                if f[cell.get()] < f[open[best].get()] {
                    best = i;
                }
            }
            let current = open.remove(best);
            if current == goal {
                let mut path = vec![goal];
                while let Some(prev) = previous[path[path.len() - 1].get()] {
                    path.push(prev);
                }
                path.reverse();
                return path;
            }
            closed[current.get()] = true;
            for &next in grid.neighbours(current) {
                if closed[next.get()] || !grid.is_passable(next) {
                    continue;
                }
                let tentative = g[current.get()] + 1;
                let is_open = open.contains(&next);
                if !is_open || tentative < g[next.get()] {
                    previous[next.get()] = Some(current);
                    g[next.get()] = tentative;
                    f[next.get()] = tentative + heuristic(grid.pos_of(next), goal_pos);
                    if !is_open {
                        open.push(next);
                    }
                }
            }
        }
        Vec::new()
    }
}
