//! FNV-1a state hashing for determinism checks.
//!
//! Two worlds built from the same configuration and ticked the same
//! number of times must hash identically. Not cryptographically secure.

use crate::view::WorldView;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a single byte into an FNV-1a hash state.
#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Feed a u32 (as 4 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Feed a u64 (as 8 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash dimensions, tick, wall mask, and every agent's position and goal.
///
/// Dimensions and tick come first, then one byte per cell for the wall
/// mask, then the agent count followed by each agent's id, position and
/// goal in turn order. Occupancy is implied by agent positions.
pub fn state_hash(view: &WorldView) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, view.rows());
    hash = fnv1a_u32(hash, view.cols());
    hash = fnv1a_u64(hash, view.tick().0);
    for &wall in view.walls() {
        hash = fnv1a_byte(hash, wall as u8);
    }
    hash = fnv1a_u64(hash, view.agents().len() as u64);
    for agent in view.agents() {
        hash = fnv1a_u32(hash, agent.id.0);
        hash = fnv1a_u32(hash, agent.position.row);
        hash = fnv1a_u32(hash, agent.position.col);
        hash = fnv1a_u32(hash, agent.goal.row);
        hash = fnv1a_u32(hash, agent.goal.col);
    }
    hash
}
