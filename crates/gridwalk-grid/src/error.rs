//! Error types for grid construction and occupancy updates.

use gridwalk_core::{AgentId, CellIndex, Pos};
use std::error::Error;
use std::fmt;

/// Errors arising from grid construction, coordinate lookup, or
/// occupancy changes.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Attempted to construct a grid with zero rows or zero columns.
    EmptyGrid,
    /// `rows * cols` does not fit the `u32` cell index.
    CellCountOverflow {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        cols: u32,
    },
    /// A coordinate is outside the bounds of the grid.
    CoordOutOfBounds {
        /// The offending coordinate.
        pos: Pos,
        /// Grid rows.
        rows: u32,
        /// Grid columns.
        cols: u32,
    },
    /// Wall probability is NaN or outside `[0, 1]`.
    InvalidWallProbability {
        /// The rejected value.
        value: f64,
    },
    /// A text layout or wall mask does not describe a rectangular grid.
    LayoutMismatch {
        /// What went wrong.
        reason: String,
    },
    /// The target cell already holds another agent.
    CellOccupied {
        /// Target cell.
        cell: CellIndex,
        /// The agent already standing there.
        occupant: AgentId,
    },
    /// The target cell is a wall.
    CellBlocked {
        /// Target cell.
        cell: CellIndex,
    },
    /// A move was requested from a cell with no occupant.
    NotOccupied {
        /// Source cell.
        cell: CellIndex,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one row and one column"),
            Self::CellCountOverflow { rows, cols } => {
                write!(f, "grid {rows}x{cols} exceeds u32::MAX cells")
            }
            Self::CoordOutOfBounds { pos, rows, cols } => {
                write!(f, "coordinate {pos} out of bounds: [0, {rows}) x [0, {cols})")
            }
            Self::InvalidWallProbability { value } => {
                write!(f, "wall probability must be in [0.0, 1.0], got {value}")
            }
            Self::LayoutMismatch { reason } => write!(f, "invalid layout: {reason}"),
            Self::CellOccupied { cell, occupant } => {
                write!(f, "cell {cell} is already occupied by agent {occupant}")
            }
            Self::CellBlocked { cell } => write!(f, "cell {cell} is a wall"),
            Self::NotOccupied { cell } => write!(f, "cell {cell} has no occupant"),
        }
    }
}

impl Error for GridError {}
