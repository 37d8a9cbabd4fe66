//! Text layouts for hand-built grids.
//!
//! A layout is one line per row, `#` for a wall and `.` for an open cell.
//! Leading and trailing whitespace on each line is ignored, as are blank
//! lines, so layouts can be written as indented raw strings.

use crate::error::GridError;
use crate::grid::Grid;

/// Character marking a wall cell.
pub const WALL: char = '#';
/// Character marking an open cell.
pub const OPEN: char = '.';

impl Grid {
    /// Build a grid from a text layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridwalk_grid::Grid;
    ///
    /// let grid = Grid::from_layout(
    ///     "
    ///     ..#
    ///     ...
    ///     ",
    /// )
    /// .unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (2, 3));
    /// assert_eq!(grid.wall_count(), 1);
    /// ```
    pub fn from_layout(layout: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(GridError::EmptyGrid);
        };
        let cols = first.chars().count();
        let mut walls = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(GridError::LayoutMismatch {
                    reason: format!("row {row} has {width} cells, expected {cols}"),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    WALL => walls.push(true),
                    OPEN => walls.push(false),
                    other => {
                        return Err(GridError::LayoutMismatch {
                            reason: format!("unexpected '{other}' at ({row}, {col})"),
                        })
                    }
                }
            }
        }
        let rows = u32::try_from(lines.len()).map_err(|_| GridError::LayoutMismatch {
            reason: "too many rows".to_string(),
        })?;
        let cols = u32::try_from(cols).map_err(|_| GridError::LayoutMismatch {
            reason: "too many columns".to_string(),
        })?;
        Grid::from_mask(rows, cols, &walls)
    }

    /// Render walls back to layout text, one line per row.
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(self.cell_count() + self.rows() as usize);
        for (i, cell) in self.cells().iter().enumerate() {
            if i > 0 && i % self.cols() as usize == 0 {
                out.push('\n');
            }
            out.push(if cell.is_wall() { WALL } else { OPEN });
        }
        out
    }
}
