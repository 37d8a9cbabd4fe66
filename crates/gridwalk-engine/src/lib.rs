//! Multi-agent simulation engine for Gridwalk.
//!
//! A [`LockstepWorld`] holds a grid, a roster of agents, and a round-robin
//! [`Scheduler`]. Each tick exactly one agent replans its route with A*
//! and steps at most one cell. [`RealtimeWorld`] runs the same loop on a
//! background thread at a fixed rate and publishes [`WorldView`]
//! snapshots.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod hash;
pub mod metrics;
pub mod realtime;
pub mod roster;
pub mod scheduler;
pub mod view;
pub mod world;

pub use agent::{Agent, TurnOutcome};
pub use config::{ConfigError, WorldConfig};
pub use hash::state_hash;
pub use metrics::{TurnMetrics, WorldStats};
pub use realtime::RealtimeWorld;
pub use roster::Roster;
pub use scheduler::{Scheduler, SchedulerState, TurnRecord};
pub use view::{agent_glyph, AgentView, CellState, WorldView};
pub use world::LockstepWorld;
