//! Round-robin turn scheduler.
//!
//! Exactly one agent acts per tick. The active slot is
//! `turn mod roster_len`, so over any window of `roster_len` consecutive
//! ticks every agent gets exactly one turn.

use gridwalk_core::{AgentId, TickId};
use gridwalk_grid::Grid;
use gridwalk_search::PathFinder;

use crate::agent::TurnOutcome;
use crate::roster::Roster;

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchedulerState {
    /// Constructed, no tick run yet.
    #[default]
    Idle,
    /// Ticking.
    Running,
}

/// Record of one scheduled turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    /// Turn counter value the tick ran as.
    pub tick: TickId,
    /// Agent that acted and how, `None` for an empty roster.
    pub action: Option<(AgentId, TurnOutcome)>,
}

/// Round-robin scheduler over a [`Roster`].
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    state: SchedulerState,
    turn: TickId,
}

impl Scheduler {
    /// A fresh scheduler at turn 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to [`SchedulerState::Running`]. Idempotent.
    pub fn start(&mut self) {
        self.state = SchedulerState::Running;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of ticks run so far.
    pub fn turn(&self) -> TickId {
        self.turn
    }

    /// Slot that will act on the next tick, `None` for an empty roster.
    pub fn next_slot(&self, roster_len: usize) -> Option<usize> {
        if roster_len == 0 {
            None
        } else {
            Some((self.turn.0 % roster_len as u64) as usize)
        }
    }

    /// Run one tick: give the active agent its turn, then advance the
    /// counter.
    ///
    /// Starts the scheduler if it is still idle. With an empty roster the
    /// tick does nothing but advance the counter.
    pub fn tick(
        &mut self,
        roster: &mut Roster,
        grid: &mut Grid,
        finder: &mut PathFinder,
    ) -> TurnRecord {
        self.start();
        let tick = self.turn;
        let action = self
            .next_slot(roster.len())
            .and_then(|slot| roster.by_slot_mut(slot))
            .map(|agent| (agent.id(), agent.take_turn(grid, finder)));
        self.turn = self.turn.next();
        TurnRecord { tick, action }
    }
}
