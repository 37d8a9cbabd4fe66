//! Lockstep (synchronous) simulation world.
//!
//! [`LockstepWorld`] owns the grid, the agent roster, the scheduler, and
//! a shared [`PathFinder`]. Each call to [`tick()`](LockstepWorld::tick)
//! gives exactly one agent its turn and returns the metrics for it.
//!
//! # Construction
//!
//! [`LockstepWorld::new`] generates everything from a [`WorldConfig`]
//! using a seeded ChaCha8 stream: first the wall mask in row-major
//! order, then for each agent in turn a start cell (row, then column)
//! and a goal cell (row, then column). A start draw that lands on an
//! occupied cell is redrawn. Start cells are always cleared of walls;
//! goal cells only when [`WorldConfig::clear_goal_walls`] is set.
//!
//! [`LockstepWorld::with_agents`] takes a hand-built grid and explicit
//! start/goal pairs instead.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use gridwalk_core::{AgentId, CellIndex, Pos, TickId};
use gridwalk_grid::Grid;
use gridwalk_search::PathFinder;

use crate::agent::{Agent, TurnOutcome};
use crate::config::{ConfigError, WorldConfig};
use crate::metrics::{TurnMetrics, WorldStats};
use crate::roster::Roster;
use crate::scheduler::{Scheduler, SchedulerState};
use crate::view::WorldView;

// Compile-time assertion: LockstepWorld can move to a tick thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LockstepWorld>();
    }
};

/// Where the initial world state comes from.
#[derive(Clone, Debug)]
enum Layout {
    /// Regenerated from the config and a seed.
    Generated,
    /// A fixed wall grid (no occupants) plus start/goal cells.
    Fixed {
        grid: Grid,
        placements: Vec<(CellIndex, CellIndex)>,
    },
}

/// A single-threaded multi-agent world advanced one turn at a time.
#[derive(Debug)]
pub struct LockstepWorld {
    config: WorldConfig,
    layout: Layout,
    grid: Grid,
    roster: Roster,
    scheduler: Scheduler,
    finder: PathFinder,
    last_active: Option<AgentId>,
    last_metrics: TurnMetrics,
    stats: WorldStats,
}

impl LockstepWorld {
    /// Validate `config` and generate a world from `config.seed`.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (grid, roster) = generate(&config, config.seed)?;
        let world = Self::assemble(config, Layout::Generated, grid, roster);
        tracing::info!(
            rows = world.grid.rows(),
            cols = world.grid.cols(),
            agents = world.roster.len(),
            walls = world.grid.wall_count(),
            seed = world.config.seed,
            "world generated"
        );
        Ok(world)
    }

    /// Build a world on `grid` with one agent per `(start, goal)` pair.
    ///
    /// Agents get ids `0..placements.len()` in order. Start walls are
    /// cleared; goal walls are cleared only if `clear_goal_walls`. Fails
    /// if a coordinate is outside the grid or two agents share a start.
    pub fn with_agents(
        grid: Grid,
        placements: &[(Pos, Pos)],
        clear_goal_walls: bool,
    ) -> Result<Self, ConfigError> {
        let cells = placements
            .iter()
            .map(|&(start, goal)| -> Result<_, ConfigError> {
                Ok((grid.index_of(start)?, grid.index_of(goal)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut pristine = grid;
        for cell in 0..pristine.cell_count() {
            pristine.vacate(CellIndex(cell as u32));
        }
        let config = WorldConfig {
            rows: pristine.rows(),
            cols: pristine.cols(),
            agent_count: cells.len(),
            wall_probability: pristine.wall_count() as f64 / pristine.cell_count() as f64,
            clear_goal_walls,
            ..WorldConfig::default()
        };
        let (grid, roster) = place_fixed(&pristine, &cells, clear_goal_walls)?;
        let layout = Layout::Fixed {
            grid: pristine,
            placements: cells,
        };
        let world = Self::assemble(config, layout, grid, roster);
        tracing::info!(
            rows = world.grid.rows(),
            cols = world.grid.cols(),
            agents = world.roster.len(),
            walls = world.grid.wall_count(),
            "world built from layout"
        );
        Ok(world)
    }

    fn assemble(config: WorldConfig, layout: Layout, grid: Grid, roster: Roster) -> Self {
        let finder = PathFinder::with_capacity(grid.cell_count());
        Self {
            config,
            layout,
            grid,
            roster,
            scheduler: Scheduler::new(),
            finder,
            last_active: None,
            last_metrics: TurnMetrics::default(),
            stats: WorldStats::default(),
        }
    }

    /// Run one turn for the scheduled agent.
    pub fn tick(&mut self) -> TurnMetrics {
        let started = Instant::now();
        let record = self
            .scheduler
            .tick(&mut self.roster, &mut self.grid, &mut self.finder);

        let (agent, outcome) = match record.action {
            Some((id, outcome)) => (Some(id), Some(outcome)),
            None => (None, None),
        };
        // An idle turn runs no search, so the finder's stats are stale.
        let (path_len, expanded) = match outcome {
            Some(TurnOutcome::Moved { .. } | TurnOutcome::Stuck) => {
                let stats = self.finder.stats();
                (stats.path_len, stats.expanded)
            }
            _ => (0, 0),
        };
        if agent.is_some() {
            self.last_active = agent;
        }

        let metrics = TurnMetrics {
            tick: record.tick,
            agent,
            outcome,
            path_len,
            expanded,
            total_us: started.elapsed().as_micros() as u64,
        };
        tracing::debug!(
            tick = %metrics.tick,
            agent = ?metrics.agent,
            outcome = ?metrics.outcome,
            path_len = metrics.path_len,
            expanded = metrics.expanded,
            "turn"
        );
        self.stats.record(&metrics);
        self.last_metrics = metrics.clone();
        metrics
    }

    /// Run `ticks` turns back to back.
    pub fn run(&mut self, ticks: u64) -> &WorldStats {
        for _ in 0..ticks {
            self.tick();
        }
        &self.stats
    }

    /// Tick until every agent is on its goal, at most `max_ticks` times.
    ///
    /// Returns the number of ticks run if everyone arrived, `None` if the
    /// budget ran out first.
    pub fn run_until_arrived(&mut self, max_ticks: u64) -> Option<u64> {
        for ran in 0..=max_ticks {
            if self.roster.all_arrived() {
                return Some(ran);
            }
            if ran < max_ticks {
                self.tick();
            }
        }
        None
    }

    /// Rebuild the world from `seed` and rewind the scheduler to turn 0.
    ///
    /// Generated worlds draw a fresh grid and agents; worlds built with
    /// [`with_agents`](Self::with_agents) return to their initial
    /// placement and only record the seed.
    pub fn reset(&mut self, seed: u64) -> Result<(), ConfigError> {
        let (grid, roster) = match &self.layout {
            Layout::Generated => generate(&self.config, seed)?,
            Layout::Fixed { grid, placements } => {
                place_fixed(grid, placements, self.config.clear_goal_walls)?
            }
        };
        self.config.seed = seed;
        self.grid = grid;
        self.roster = roster;
        self.scheduler = Scheduler::new();
        self.last_active = None;
        self.last_metrics = TurnMetrics::default();
        self.stats = WorldStats::default();
        tracing::info!(
            seed,
            walls = self.grid.wall_count(),
            agents = self.roster.len(),
            "world reset"
        );
        Ok(())
    }

    /// Owned snapshot of the current state.
    pub fn view(&self) -> WorldView {
        WorldView::capture(
            &self.grid,
            &self.roster,
            self.scheduler.turn(),
            self.last_active,
        )
    }

    /// Configuration the world was built from (seed updated by resets).
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Seed of the current world.
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// The grid, including occupancy.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Agents in turn order.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Look up one agent.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.roster.get(id)
    }

    /// Number of ticks completed.
    pub fn current_tick(&self) -> TickId {
        self.scheduler.turn()
    }

    /// Scheduler lifecycle state.
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Agent that took the most recent turn.
    pub fn last_active(&self) -> Option<AgentId> {
        self.last_active
    }

    /// Path planned by the most recently active agent.
    pub fn last_path(&self) -> &[CellIndex] {
        self.last_active
            .and_then(|id| self.roster.get(id))
            .map(Agent::last_path)
            .unwrap_or_default()
    }

    /// Whether `cell` is some agent's goal.
    pub fn is_goal(&self, cell: CellIndex) -> bool {
        self.roster.is_goal(cell)
    }

    /// Whether every agent stands on its goal.
    pub fn all_arrived(&self) -> bool {
        self.roster.all_arrived()
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &TurnMetrics {
        &self.last_metrics
    }

    /// Counters since construction or the last reset.
    pub fn stats(&self) -> &WorldStats {
        &self.stats
    }
}

fn generate(config: &WorldConfig, seed: u64) -> Result<(Grid, Roster), ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = Grid::random(config.rows, config.cols, config.wall_probability, &mut rng)?;
    let mut roster = Roster::new();

    for i in 0..config.agent_count {
        let start = loop {
            let cell = draw_cell(&grid, &mut rng)?;
            if !grid.is_occupied(cell) {
                break cell;
            }
        };
        let goal = draw_cell(&grid, &mut rng)?;
        if config.clear_goal_walls {
            grid.clear_wall(goal);
        }
        roster.push(Agent::place(&mut grid, AgentId(i as u32), start, goal)?)?;
    }
    Ok((grid, roster))
}

fn draw_cell(grid: &Grid, rng: &mut ChaCha8Rng) -> Result<CellIndex, ConfigError> {
    let row = rng.random_range(0..grid.rows());
    let col = rng.random_range(0..grid.cols());
    Ok(grid.index_of(Pos::new(row, col))?)
}

fn place_fixed(
    pristine: &Grid,
    placements: &[(CellIndex, CellIndex)],
    clear_goal_walls: bool,
) -> Result<(Grid, Roster), ConfigError> {
    let mut grid = pristine.clone();
    let mut roster = Roster::new();
    for (i, &(start, goal)) in placements.iter().enumerate() {
        if clear_goal_walls {
            grid.clear_wall(goal);
        }
        roster.push(Agent::place(&mut grid, AgentId(i as u32), start, goal)?)?;
    }
    Ok((grid, roster))
}
