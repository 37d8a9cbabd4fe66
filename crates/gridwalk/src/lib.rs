//! Gridwalk: turn-based multi-agent path finding on a 2D grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Gridwalk sub-crates. For most users, adding `gridwalk` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gridwalk::prelude::*;
//!
//! let config = WorldConfig {
//!     rows: 10,
//!     cols: 10,
//!     agent_count: 2,
//!     seed: 42,
//!     ..WorldConfig::default()
//! };
//! let mut world = LockstepWorld::new(config).unwrap();
//! let metrics = world.tick();
//! assert_eq!(metrics.tick, TickId(0));
//! assert_eq!(metrics.agent, Some(AgentId(0)));
//! assert_eq!(world.current_tick(), TickId(1));
//! print!("{}", world.view().render_ascii());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridwalk-core` | IDs and coordinates |
//! | [`grid`] | `gridwalk-grid` | Grid, cells, walls, occupancy, text layouts |
//! | [`search`] | `gridwalk-search` | A* path finder and search scratch |
//! | [`engine`] | `gridwalk-engine` | Agents, scheduler, lockstep and realtime worlds |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers and coordinates (`gridwalk-core`).
pub use gridwalk_core as types;

/// The grid: cells, walls, adjacency, and occupancy (`gridwalk-grid`).
pub use gridwalk_grid as grid;

/// A* path finding (`gridwalk-search`).
///
/// [`search::PathFinder`] keeps its scratch buffers between searches.
pub use gridwalk_search as search;

/// Simulation worlds (`gridwalk-engine`).
///
/// [`engine::LockstepWorld`] for caller-driven ticking,
/// [`engine::RealtimeWorld`] for a background tick thread.
pub use gridwalk_engine as engine;

/// Common imports for typical Gridwalk usage.
///
/// ```rust
/// use gridwalk::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gridwalk_core::{AgentId, CellIndex, Pos, TickId};

    // Grid
    pub use gridwalk_grid::{Grid, GridError};

    // Search
    pub use gridwalk_search::{find_path, PathFinder};

    // Engine
    pub use gridwalk_engine::{
        state_hash, CellState, ConfigError, LockstepWorld, RealtimeWorld, TurnMetrics,
        TurnOutcome, WorldConfig, WorldView,
    };
}
