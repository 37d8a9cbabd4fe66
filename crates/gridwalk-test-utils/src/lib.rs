//! Test utilities and reference oracles for Gridwalk development.
//!
//! - [`bfs_distance`]: brute-force shortest hop count, the oracle A* is
//!   checked against.
//! - [`random_layout`]: proptest strategy for small random wall masks.
//! - [`assert_occupancy_consistent`]: cross-checks agent positions against
//!   the grid's occupancy map.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod oracle;

pub use oracle::{assert_occupancy_consistent, bfs_distance, random_layout};
