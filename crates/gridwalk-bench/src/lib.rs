//! Benchmark profiles for the Gridwalk simulation.
//!
//! - [`reference_profile`]: the classic 25x25 demo world
//! - [`stress_profile`]: 200x200 grid with 64 agents
//! - [`serpentine`]: a worst-case maze for a single long search

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gridwalk_core::Pos;
use gridwalk_engine::WorldConfig;
use gridwalk_grid::{Grid, GridError};

/// 25x25 grid, 25% walls, 4 agents.
pub fn reference_profile(seed: u64) -> WorldConfig {
    WorldConfig {
        seed,
        ..WorldConfig::default()
    }
}

/// 200x200 grid (40K cells), 20% walls, 64 agents.
pub fn stress_profile(seed: u64) -> WorldConfig {
    WorldConfig {
        rows: 200,
        cols: 200,
        agent_count: 64,
        wall_probability: 0.2,
        seed,
        ..WorldConfig::default()
    }
}

/// Square grid of `size` cells per side whose walls force a boustrophedon
/// route: every odd row is walled except for one gap, alternating between
/// the right and left edge.
///
/// The route from `(0, 0)` to the last row visits every open cell.
pub fn serpentine(size: u32) -> Result<Grid, GridError> {
    Grid::from_walls(size, size, |Pos { row, col }| {
        if row % 2 == 0 {
            return false;
        }
        let gap = if (row / 2) % 2 == 0 { size - 1 } else { 0 };
        col != gap
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile(0).validate().is_ok());
        assert!(stress_profile(0).validate().is_ok());
    }

    #[test]
    fn serpentine_gaps_alternate() {
        let grid = serpentine(5).unwrap();
        assert_eq!(grid.to_layout(), ".....\n####.\n.....\n.####\n.....");
    }
}
