//! Deterministic A* path finding for Gridwalk.
//!
//! [`PathFinder`] searches a [`Grid`](gridwalk_grid::Grid) for a shortest
//! 4-connected path, treating walls and agent-occupied cells as blocked.
//! It owns a reusable [`SearchScratch`] so agents can replan every turn
//! without reallocating.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod astar;
pub mod scratch;

pub use astar::{find_path, heuristic, PathFinder, SearchStats};
pub use scratch::{NodeState, Scores, SearchScratch};
