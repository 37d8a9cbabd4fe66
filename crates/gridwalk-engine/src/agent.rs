//! A single walking agent and its per-turn behaviour.

use gridwalk_core::{AgentId, CellIndex};
use gridwalk_grid::{Grid, GridError};
use gridwalk_search::PathFinder;

/// Result of one [`Agent::take_turn`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Already at the goal; no search ran.
    Idle,
    /// Stepped one cell along a freshly planned path.
    Moved {
        /// Cell vacated.
        from: CellIndex,
        /// Cell entered.
        to: CellIndex,
    },
    /// No path to the goal this turn; stayed put.
    Stuck,
}

/// An agent that replans toward a fixed goal every time it is scheduled.
///
/// The agent's position is mirrored in the grid's occupancy map. The
/// only writers of that map are [`Agent::place`] and
/// [`Agent::take_turn`], so the two never drift apart.
#[derive(Clone, Debug)]
pub struct Agent {
    id: AgentId,
    position: CellIndex,
    goal: CellIndex,
    last_path: Vec<CellIndex>,
}

impl Agent {
    /// Place a new agent on `start`, clearing any wall there.
    ///
    /// Fails with [`GridError::CellOccupied`] if another agent already
    /// stands on `start`. The goal is stored as given; whether it is a
    /// wall is the caller's business.
    pub fn place(
        grid: &mut Grid,
        id: AgentId,
        start: CellIndex,
        goal: CellIndex,
    ) -> Result<Self, GridError> {
        if let Some(occupant) = grid.occupant(start) {
            if occupant != id {
                return Err(GridError::CellOccupied {
                    cell: start,
                    occupant,
                });
            }
        }
        grid.clear_wall(start);
        grid.occupy(start, id)?;
        Ok(Self {
            id,
            position: start,
            goal,
            last_path: Vec::new(),
        })
    }

    /// Agent identifier.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Current cell.
    pub fn position(&self) -> CellIndex {
        self.position
    }

    /// Goal cell. Fixed for the agent's lifetime.
    pub fn goal(&self) -> CellIndex {
        self.goal
    }

    /// Whether the agent stands on its goal.
    pub fn has_arrived(&self) -> bool {
        self.position == self.goal
    }

    /// Path planned on this agent's most recent turn, start cell first.
    ///
    /// Empty before the first turn, after an idle turn, and when the last
    /// search found nothing.
    pub fn last_path(&self) -> &[CellIndex] {
        &self.last_path
    }

    /// Take one turn: replan from the current cell and step at most one
    /// cell along the result.
    pub fn take_turn(&mut self, grid: &mut Grid, finder: &mut PathFinder) -> TurnOutcome {
        if self.has_arrived() {
            self.last_path.clear();
            return TurnOutcome::Idle;
        }

        self.last_path = finder.find_path(grid, self.position, self.goal);
        let Some(&next) = self.last_path.get(1) else {
            return TurnOutcome::Stuck;
        };

        let from = self.position;
        match grid.move_occupant(from, next) {
            Ok(_) => {
                self.position = next;
                TurnOutcome::Moved { from, to: next }
            }
            Err(err) => {
                tracing::warn!(agent = %self.id, %err, "planned step rejected");
                TurnOutcome::Stuck
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::Pos;

    fn at(grid: &Grid, row: u32, col: u32) -> CellIndex {
        grid.index_of(Pos::new(row, col)).unwrap()
    }

    #[test]
    fn place_clears_start_wall_and_occupies() {
        let mut grid = Grid::from_layout("#.\n..").unwrap();
        let start = at(&grid, 0, 0);
        let goal = at(&grid, 1, 1);
        let agent = Agent::place(&mut grid, AgentId(0), start, goal).unwrap();
        assert!(!grid.is_wall(start));
        assert_eq!(grid.occupant(start), Some(AgentId(0)));
        assert_eq!(agent.position(), start);
        assert!(agent.last_path().is_empty());
    }

    #[test]
    fn place_on_occupied_cell_fails() {
        let mut grid = Grid::open(2, 2).unwrap();
        let cell = at(&grid, 0, 1);
        Agent::place(&mut grid, AgentId(0), cell, cell).unwrap();
        let err = Agent::place(&mut grid, AgentId(1), cell, cell).unwrap_err();
        assert_eq!(
            err,
            GridError::CellOccupied {
                cell,
                occupant: AgentId(0)
            }
        );
    }

    #[test]
    fn turn_moves_exactly_one_step() {
        let mut grid = Grid::open(3, 3).unwrap();
        let mut finder = PathFinder::new();
        let start = at(&grid, 0, 0);
        let goal = at(&grid, 2, 2);
        let mut agent = Agent::place(&mut grid, AgentId(0), start, goal).unwrap();

        let outcome = agent.take_turn(&mut grid, &mut finder);

        assert_eq!(
            outcome,
            TurnOutcome::Moved {
                from: at(&grid, 0, 0),
                to: at(&grid, 1, 0)
            }
        );
        assert_eq!(agent.position(), at(&grid, 1, 0));
        assert_eq!(grid.occupant(at(&grid, 0, 0)), None);
        assert_eq!(grid.occupant(at(&grid, 1, 0)), Some(AgentId(0)));
        assert_eq!(agent.last_path().len(), 5);
        assert_eq!(agent.last_path()[0], at(&grid, 0, 0));
    }

    #[test]
    fn arrived_agent_is_idle() {
        let mut grid = Grid::open(2, 2).unwrap();
        let mut finder = PathFinder::new();
        let cell = at(&grid, 1, 1);
        let mut agent = Agent::place(&mut grid, AgentId(0), cell, cell).unwrap();
        assert!(agent.has_arrived());
        assert_eq!(agent.take_turn(&mut grid, &mut finder), TurnOutcome::Idle);
        assert_eq!(agent.position(), cell);
        assert!(agent.last_path().is_empty());
        assert_eq!(finder.stats().expanded, 0);
    }

    #[test]
    fn unreachable_goal_leaves_agent_stuck() {
        let mut grid = Grid::from_layout("..#.").unwrap();
        let mut finder = PathFinder::new();
        let start = at(&grid, 0, 0);
        let goal = at(&grid, 0, 3);
        let mut agent = Agent::place(&mut grid, AgentId(0), start, goal).unwrap();
        for _ in 0..3 {
            assert_eq!(agent.take_turn(&mut grid, &mut finder), TurnOutcome::Stuck);
        }
        assert!(agent.last_path().is_empty());
        assert_eq!(agent.position(), start);
        assert_eq!(grid.occupant(start), Some(AgentId(0)));
    }

    #[test]
    fn reaches_goal_after_distance_turns() {
        let mut grid = Grid::open(4, 4).unwrap();
        let mut finder = PathFinder::new();
        let goal = at(&grid, 3, 2);
        let start = at(&grid, 0, 0);
        let mut agent = Agent::place(&mut grid, AgentId(0), start, goal).unwrap();
        for _ in 0..5 {
            assert!(matches!(
                agent.take_turn(&mut grid, &mut finder),
                TurnOutcome::Moved { .. }
            ));
        }
        assert!(agent.has_arrived());
        assert_eq!(grid.occupant(goal), Some(AgentId(0)));
        assert_eq!(agent.take_turn(&mut grid, &mut finder), TurnOutcome::Idle);
    }

    #[test]
    fn other_agent_blocks_goal() {
        let mut grid = Grid::open(1, 3).unwrap();
        let mut finder = PathFinder::new();
        let goal = at(&grid, 0, 2);
        let start = at(&grid, 0, 0);
        let mut walker = Agent::place(&mut grid, AgentId(0), start, goal).unwrap();
        let _squatter = Agent::place(&mut grid, AgentId(1), goal, goal).unwrap();
        assert_eq!(walker.take_turn(&mut grid, &mut finder), TurnOutcome::Stuck);
        assert_eq!(walker.position(), at(&grid, 0, 0));
    }
}
