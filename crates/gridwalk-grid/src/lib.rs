//! Obstacle grid for Gridwalk simulations.
//!
//! A [`Grid`] is a fixed rectangle of [`Cell`]s with static walls, a
//! precomputed 4-connected neighbourhood (up, down, left, right), and the
//! single authoritative occupancy map recording which agent stands where.
//!
//! Grids are built from a seeded RNG ([`Grid::random`]), a wall mask
//! ([`Grid::from_mask`]), a predicate ([`Grid::from_walls`]) or a text
//! layout ([`Grid::from_layout`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod layout;

pub use cell::{Cell, Neighbours};
pub use error::GridError;
pub use grid::{Grid, DEFAULT_WALL_PROBABILITY};
