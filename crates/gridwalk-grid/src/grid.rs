//! The obstacle grid: cells, 4-neighbour adjacency and the occupancy map.

use crate::cell::Cell;
use crate::error::GridError;
use gridwalk_core::{AgentId, CellIndex, Pos};
use rand::Rng;

/// Probability that a freshly populated cell is a wall.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.25;

/// A fixed-size rectangular grid with 4-connected neighbourhood.
///
/// Cells are stored row-major: the cell at `(row, col)` has index
/// `row * cols + col`. Walls are fixed once the grid is built (apart from
/// the construction-time [`clear_wall`](Self::clear_wall) used when placing
/// agents). Occupancy is dynamic and lives in a single map owned by the
/// grid, so the only writers are [`occupy`](Self::occupy),
/// [`vacate`](Self::vacate) and [`move_occupant`](Self::move_occupant).
///
/// # Examples
///
/// ```
/// use gridwalk_core::Pos;
/// use gridwalk_grid::Grid;
///
/// let grid = Grid::open(3, 4).unwrap();
/// assert_eq!(grid.cell_count(), 12);
///
/// // Corner cell: down and right only.
/// let corner = grid.index_of(Pos::new(0, 0)).unwrap();
/// assert_eq!(grid.neighbours(corner).len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
    occupancy: Vec<Option<AgentId>>,
    neighbours_built: bool,
}

impl Grid {
    /// Create a grid with no walls.
    pub fn open(rows: u32, cols: u32) -> Result<Self, GridError> {
        Self::from_walls(rows, cols, |_| false)
    }

    /// Create a grid whose walls are drawn independently per cell with
    /// probability `wall_probability`, in row-major order.
    ///
    /// Returns `Err(GridError::InvalidWallProbability)` for NaN or values
    /// outside `[0, 1]`.
    pub fn random<R: Rng + ?Sized>(
        rows: u32,
        cols: u32,
        wall_probability: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&wall_probability) {
            return Err(GridError::InvalidWallProbability {
                value: wall_probability,
            });
        }
        Self::from_walls(rows, cols, |_| rng.random_bool(wall_probability))
    }

    /// Create a grid, asking `is_wall` for each cell in row-major order.
    pub fn from_walls(
        rows: u32,
        cols: u32,
        is_wall: impl FnMut(Pos) -> bool,
    ) -> Result<Self, GridError> {
        let mut grid = Self::populate(rows, cols, is_wall)?;
        grid.compute_neighbours();
        Ok(grid)
    }

    /// Create a grid from a row-major wall mask of length `rows * cols`.
    pub fn from_mask(rows: u32, cols: u32, walls: &[bool]) -> Result<Self, GridError> {
        let expected = (rows as usize).saturating_mul(cols as usize);
        if walls.len() != expected {
            return Err(GridError::LayoutMismatch {
                reason: format!(
                    "wall mask has {} entries, expected {rows}x{cols} = {expected}",
                    walls.len()
                ),
            });
        }
        Self::from_walls(rows, cols, |p| {
            walls[p.row as usize * cols as usize + p.col as usize]
        })
    }

    /// Fill every slot with a new cell. Adjacency is not built yet.
    fn populate(
        rows: u32,
        cols: u32,
        mut is_wall: impl FnMut(Pos) -> bool,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        let count = u64::from(rows) * u64::from(cols);
        if count > u64::from(u32::MAX) {
            return Err(GridError::CellCountOverflow { rows, cols });
        }
        let count = count as usize;
        let mut cells = Vec::with_capacity(count);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Pos::new(row, col);
                let index = CellIndex(row * cols + col);
                cells.push(Cell::new(index, pos, is_wall(pos)));
            }
        }
        Ok(Self {
            rows,
            cols,
            cells,
            occupancy: vec![None; count],
            neighbours_built: false,
        })
    }

    /// Append each cell's in-bounds neighbours in up, down, left, right
    /// order. Runs once; later calls are no-ops.
    fn compute_neighbours(&mut self) {
        if self.neighbours_built {
            return;
        }
        let rows = self.rows;
        let cols = self.cols;
        for cell in &mut self.cells {
            let Pos { row, col } = cell.pos();
            let out = cell.neighbours_mut();
            if row > 0 {
                out.push(CellIndex((row - 1) * cols + col));
            }
            if row + 1 < rows {
                out.push(CellIndex((row + 1) * cols + col));
            }
            if col > 0 {
                out.push(CellIndex(row * cols + col - 1));
            }
            if col + 1 < cols {
                out.push(CellIndex(row * cols + col + 1));
            }
        }
        self.neighbours_built = true;
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Always returns `false`; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Convert a coordinate to its cell index.
    pub fn index_of(&self, pos: Pos) -> Result<CellIndex, GridError> {
        if !self.contains(pos) {
            return Err(GridError::CoordOutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(CellIndex(pos.row * self.cols + pos.col))
    }

    /// Coordinates of a cell.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to this grid.
    pub fn pos_of(&self, index: CellIndex) -> Pos {
        self.cells[index.get()].pos()
    }

    /// The cell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to this grid.
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.get()]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Neighbours of `index` in up, down, left, right order.
    pub fn neighbours(&self, index: CellIndex) -> &[CellIndex] {
        self.cells[index.get()].neighbours()
    }

    /// Whether `index` is a static obstacle.
    pub fn is_wall(&self, index: CellIndex) -> bool {
        self.cells[index.get()].is_wall()
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    /// Remove the wall at `index`.
    ///
    /// Only for world construction (agent start cells, optional goal
    /// cells). Walls do not change once ticking begins.
    pub fn clear_wall(&mut self, index: CellIndex) {
        self.cells[index.get()].clear_wall();
    }

    /// The agent standing on `index`, if any.
    pub fn occupant(&self, index: CellIndex) -> Option<AgentId> {
        self.occupancy[index.get()]
    }

    /// Whether any agent stands on `index`.
    pub fn is_occupied(&self, index: CellIndex) -> bool {
        self.occupancy[index.get()].is_some()
    }

    /// Whether an agent could step onto `index`: not a wall, not occupied.
    pub fn is_passable(&self, index: CellIndex) -> bool {
        !self.is_wall(index) && !self.is_occupied(index)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupancy.iter().filter(|o| o.is_some()).count()
    }

    /// Place `agent` on `index`.
    ///
    /// Placing an agent on a cell it already holds is a no-op.
    pub fn occupy(&mut self, index: CellIndex, agent: AgentId) -> Result<(), GridError> {
        if self.is_wall(index) {
            return Err(GridError::CellBlocked { cell: index });
        }
        match self.occupancy[index.get()] {
            Some(other) if other != agent => Err(GridError::CellOccupied {
                cell: index,
                occupant: other,
            }),
            _ => {
                self.occupancy[index.get()] = Some(agent);
                Ok(())
            }
        }
    }

    /// Clear the occupant of `index`, returning who was there.
    pub fn vacate(&mut self, index: CellIndex) -> Option<AgentId> {
        self.occupancy[index.get()].take()
    }

    /// Move whoever stands on `from` onto `to`.
    ///
    /// Fails without changing anything if `from` is empty or `to` is a
    /// wall or occupied.
    pub fn move_occupant(&mut self, from: CellIndex, to: CellIndex) -> Result<AgentId, GridError> {
        let agent = self
            .occupant(from)
            .ok_or(GridError::NotOccupied { cell: from })?;
        if from == to {
            return Ok(agent);
        }
        self.occupy(to, agent)?;
        self.occupancy[from.get()] = None;
        Ok(agent)
    }
}
