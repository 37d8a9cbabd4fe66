//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the builder-input for constructing a simulation
//! world. [`validate()`](WorldConfig::validate) rejects bad startup
//! parameters before any grid or agent is built.

use std::error::Error;
use std::fmt;

use gridwalk_core::AgentId;
use gridwalk_grid::{GridError, DEFAULT_WALL_PROBABILITY};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`WorldConfig`] or building a world.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid construction or agent placement failed.
    Grid(GridError),
    /// Wall probability is NaN or outside `[0, 1]`.
    InvalidWallProbability {
        /// The invalid value.
        value: f64,
    },
    /// More agents than cells: every agent needs its own start cell.
    TooManyAgents {
        /// Requested agent count.
        requested: usize,
        /// Cells available.
        cells: usize,
    },
    /// tick_rate_hz is NaN, infinite, zero, or negative.
    InvalidTickRate {
        /// The invalid value.
        value: f64,
    },
    /// An agent with this id is already in the roster.
    DuplicateAgent {
        /// The repeated id.
        id: AgentId,
    },
    /// Realtime mode was requested without a tick rate.
    MissingTickRate,
    /// World could not be recovered from the tick thread (it panicked).
    EngineRecoveryFailed,
    /// The tick thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::InvalidWallProbability { value } => {
                write!(f, "wall_probability must be in [0.0, 1.0], got {value}")
            }
            Self::TooManyAgents { requested, cells } => {
                write!(f, "{requested} agents do not fit on {cells} cells")
            }
            Self::InvalidTickRate { value } => {
                write!(f, "tick_rate_hz must be finite and positive, got {value}")
            }
            Self::DuplicateAgent { id } => write!(f, "agent {id} is already in the roster"),
            Self::MissingTickRate => write!(f, "realtime mode requires tick_rate_hz"),
            Self::EngineRecoveryFailed => {
                write!(f, "world could not be recovered from tick thread")
            }
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Startup parameters for a simulation world.
///
/// The defaults reproduce the classic demo: a 25×25 grid, a quarter of
/// the cells walled, four agents.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Grid rows. Must be at least 1.
    pub rows: u32,
    /// Grid columns. Must be at least 1.
    pub cols: u32,
    /// Number of agents in the roster. May be zero.
    pub agent_count: usize,
    /// Per-cell wall probability in `[0, 1]`. Default: 0.25.
    pub wall_probability: f64,
    /// RNG seed. Same seed, same walls, same agents.
    pub seed: u64,
    /// Also clear walls from goal cells when placing agents. Default:
    /// `false`, which leaves walled goals permanently unreachable.
    pub clear_goal_walls: bool,
    /// Target tick rate for [`RealtimeWorld`](crate::RealtimeWorld).
    pub tick_rate_hz: Option<f64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            cols: 25,
            agent_count: 4,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            seed: 0,
            clear_goal_walls: false,
            tick_rate_hz: None,
        }
    }
}

impl WorldConfig {
    /// Validate all startup parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Dimensions: non-empty, cell count fits u32.
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::EmptyGrid.into());
        }
        let cells = u64::from(self.rows) * u64::from(self.cols);
        if cells > u64::from(u32::MAX) {
            return Err(GridError::CellCountOverflow {
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }
        // 2. Wall probability in [0, 1] (rejects NaN).
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(ConfigError::InvalidWallProbability {
                value: self.wall_probability,
            });
        }
        // 3. One distinct start cell per agent.
        let cells = cells as usize;
        if self.agent_count > cells {
            return Err(ConfigError::TooManyAgents {
                requested: self.agent_count,
                cells,
            });
        }
        // 4. tick_rate_hz, if present, must be finite and positive with a
        //    finite reciprocal.
        if let Some(hz) = self.tick_rate_hz {
            validate_tick_rate(hz)?;
        }
        Ok(())
    }

    /// Number of cells the grid will have.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

pub(crate) fn validate_tick_rate(hz: f64) -> Result<(), ConfigError> {
    if !hz.is_finite() || hz <= 0.0 || !(1.0 / hz).is_finite() {
        return Err(ConfigError::InvalidTickRate { value: hz });
    }
    Ok(())
}
