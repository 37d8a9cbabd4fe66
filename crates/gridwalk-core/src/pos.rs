//! Grid coordinates.

use std::fmt;

/// A `(row, col)` coordinate on a 2D grid.
///
/// Rows grow downward, columns grow to the right. `Pos` carries no
/// bounds; the grid validates it when converting to a
/// [`CellIndex`](crate::CellIndex).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Row, `0 <= row < rows`.
    pub row: u32,
    /// Column, `0 <= col < cols`.
    pub col: u32,
}

impl Pos {
    /// Create a coordinate.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Manhattan (L1) distance: `|Δrow| + |Δcol|`.
    ///
    /// Equal to the hop count between two cells on an empty 4-connected
    /// grid, which makes it admissible and consistent for unit-cost search.
    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u32, u32)> for Pos {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}
