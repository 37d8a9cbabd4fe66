//! Owned snapshots of world state for renderers and other threads.
//!
//! A [`WorldView`] is a self-contained copy: it can be sent across a
//! channel and read while the world keeps ticking.

use gridwalk_core::{AgentId, CellIndex, Pos, TickId};
use gridwalk_grid::Grid;

use crate::roster::Roster;

/// Character for a wall cell in [`WorldView::render_ascii`].
pub const WALL_GLYPH: char = '#';
/// Character for an open cell.
pub const OPEN_GLYPH: char = '.';
/// Character for a goal cell with nobody on it.
pub const GOAL_GLYPH: char = '*';
/// Character for a cell on the active agent's planned path.
pub const PATH_GLYPH: char = '+';

/// What a renderer should draw in one cell.
///
/// Variants are listed in draw priority: an agent hides a goal, a goal
/// hides a path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// An agent stands here.
    Agent(AgentId),
    /// Impassable.
    Wall,
    /// Some agent's goal.
    Goal,
    /// On the path planned by the most recently active agent.
    Path,
    /// Nothing of note.
    Open,
}

/// Per-agent entry in a [`WorldView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentView {
    /// Agent identifier.
    pub id: AgentId,
    /// Current coordinate.
    pub position: Pos,
    /// Goal coordinate.
    pub goal: Pos,
    /// Whether `position == goal`.
    pub arrived: bool,
}

/// Snapshot of a world after some tick.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldView {
    rows: u32,
    cols: u32,
    tick: TickId,
    walls: Vec<bool>,
    occupants: Vec<Option<AgentId>>,
    goals: Vec<bool>,
    path: Vec<bool>,
    agents: Vec<AgentView>,
    active_agent: Option<AgentId>,
}

impl WorldView {
    pub(crate) fn capture(
        grid: &Grid,
        roster: &Roster,
        tick: TickId,
        active_agent: Option<AgentId>,
    ) -> Self {
        let n = grid.cell_count();
        let walls = (0..n).map(|i| grid.is_wall(CellIndex(i as u32))).collect();
        let occupants = (0..n).map(|i| grid.occupant(CellIndex(i as u32))).collect();

        let mut goals = vec![false; n];
        let agents = roster
            .iter()
            .map(|a| {
                goals[a.goal().get()] = true;
                AgentView {
                    id: a.id(),
                    position: grid.pos_of(a.position()),
                    goal: grid.pos_of(a.goal()),
                    arrived: a.has_arrived(),
                }
            })
            .collect();

        let mut path = vec![false; n];
        if let Some(agent) = active_agent.and_then(|id| roster.get(id)) {
            for cell in agent.last_path() {
                path[cell.get()] = true;
            }
        }

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            tick,
            walls,
            occupants,
            goals,
            path,
            agents,
            active_agent,
        }
    }

    /// Grid rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Grid columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Ticks completed when the snapshot was taken.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Agents in turn order.
    pub fn agents(&self) -> &[AgentView] {
        &self.agents
    }

    /// Agent that took the most recent turn.
    pub fn active_agent(&self) -> Option<AgentId> {
        self.active_agent
    }

    /// Row-major wall mask.
    pub fn walls(&self) -> &[bool] {
        &self.walls
    }

    /// Row-major occupancy.
    pub fn occupants(&self) -> &[Option<AgentId>] {
        &self.occupants
    }

    /// Draw state of `pos`, `None` outside the grid.
    pub fn cell_state(&self, pos: Pos) -> Option<CellState> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        let i = pos.row as usize * self.cols as usize + pos.col as usize;
        Some(if let Some(id) = self.occupants[i] {
            CellState::Agent(id)
        } else if self.walls[i] {
            CellState::Wall
        } else if self.goals[i] {
            CellState::Goal
        } else if self.path[i] {
            CellState::Path
        } else {
            CellState::Open
        })
    }

    /// Render as text, one line per row.
    ///
    /// Agents draw as `A`..`Z` by id (wrapping after 26).
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.cols as usize + 1) * self.rows as usize);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let glyph = match self.cell_state(Pos::new(row, col)) {
                    Some(CellState::Agent(id)) => agent_glyph(id),
                    Some(CellState::Wall) => WALL_GLYPH,
                    Some(CellState::Goal) => GOAL_GLYPH,
                    Some(CellState::Path) => PATH_GLYPH,
                    Some(CellState::Open) | None => OPEN_GLYPH,
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

/// Letter used for `id` in ASCII frames.
pub fn agent_glyph(id: AgentId) -> char {
    char::from(b'A' + (id.0 % 26) as u8)
}
