//! A single grid location.

use gridwalk_core::{CellIndex, Pos};
use smallvec::SmallVec;

/// Neighbour list of a cell. At most four entries on a 4-connected grid.
pub type Neighbours = SmallVec<[CellIndex; 4]>;

/// One location on a [`Grid`](crate::Grid).
///
/// A cell carries its coordinates, its identity within the grid, the
/// static wall flag and its precomputed neighbours. Dynamic state lives
/// elsewhere: occupancy in the grid's occupancy map, search scores in the
/// path finder's scratch.
#[derive(Clone, Debug)]
pub struct Cell {
    index: CellIndex,
    pos: Pos,
    wall: bool,
    neighbours: Neighbours,
}

impl Cell {
    pub(crate) fn new(index: CellIndex, pos: Pos, wall: bool) -> Self {
        Self {
            index,
            pos,
            wall,
            neighbours: Neighbours::new(),
        }
    }

    /// Identity of this cell within its grid.
    pub fn index(&self) -> CellIndex {
        self.index
    }

    /// Coordinates of this cell.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Row coordinate.
    pub fn row(&self) -> u32 {
        self.pos.row
    }

    /// Column coordinate.
    pub fn col(&self) -> u32 {
        self.pos.col
    }

    /// Whether this cell is a static obstacle.
    pub fn is_wall(&self) -> bool {
        self.wall
    }

    /// In-bounds 4-neighbours in up, down, left, right order.
    pub fn neighbours(&self) -> &[CellIndex] {
        &self.neighbours
    }

    pub(crate) fn clear_wall(&mut self) {
        self.wall = false;
    }

    pub(crate) fn neighbours_mut(&mut self) -> &mut Neighbours {
        &mut self.neighbours
    }
}
