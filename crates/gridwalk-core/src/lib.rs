//! Core types for the Gridwalk simulation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! identifiers and coordinate type shared by the grid, the path finder and
//! the engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod pos;

pub use id::{AgentId, CellIndex, TickId};
pub use pos::Pos;
