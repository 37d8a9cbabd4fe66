//! Per-turn metrics and cumulative world statistics.
//!
//! [`TurnMetrics`] captures what happened during a single tick;
//! [`WorldStats`] accumulates counters across the lifetime of a world
//! (cleared by [`reset()`](crate::LockstepWorld::reset)).

use gridwalk_core::{AgentId, TickId};

use crate::agent::TurnOutcome;

/// What one tick did and what it cost.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnMetrics {
    /// Turn counter value this tick ran as (before increment).
    pub tick: TickId,
    /// Agent that took the turn, `None` when the roster is empty.
    pub agent: Option<AgentId>,
    /// Outcome of that agent's turn.
    pub outcome: Option<TurnOutcome>,
    /// Cells in the planned path, including the agent's own cell.
    /// Zero when no search ran or no path was found.
    pub path_len: usize,
    /// Cells expanded by the search.
    pub expanded: u32,
    /// Wall-clock time for the whole tick.
    pub total_us: u64,
}

/// Cumulative counters over all ticks since construction or reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Turns in which the active agent stepped to a new cell.
    pub moves: u64,
    /// Turns in which the active agent found no path.
    pub stuck_turns: u64,
    /// Turns in which the active agent was already at its goal.
    pub idle_turns: u64,
    /// Ticks run with an empty roster.
    pub empty_ticks: u64,
    /// Total cells expanded by all searches.
    pub cells_expanded: u64,
}

impl WorldStats {
    /// Fold one tick's metrics into the counters.
    pub fn record(&mut self, metrics: &TurnMetrics) {
        self.ticks += 1;
        self.cells_expanded += u64::from(metrics.expanded);
        match metrics.outcome {
            Some(TurnOutcome::Moved { .. }) => self.moves += 1,
            Some(TurnOutcome::Stuck) => self.stuck_turns += 1,
            Some(TurnOutcome::Idle) => self.idle_turns += 1,
            None => self.empty_ticks += 1,
        }
    }
}
