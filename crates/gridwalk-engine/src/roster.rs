//! Ordered agent collection.

use indexmap::map::Entry;
use indexmap::IndexMap;

use gridwalk_core::{AgentId, CellIndex};

use crate::agent::Agent;
use crate::config::ConfigError;

/// Agents in scheduling order, addressable by id or by turn slot.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    agents: IndexMap<AgentId, Agent>,
}

impl Roster {
    /// An empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `agent` at the end of the turn order.
    ///
    /// Returns [`ConfigError::DuplicateAgent`] and leaves the roster
    /// unchanged if the id is already present.
    pub fn push(&mut self, agent: Agent) -> Result<(), ConfigError> {
        match self.agents.entry(agent.id()) {
            Entry::Occupied(_) => Err(ConfigError::DuplicateAgent { id: agent.id() }),
            Entry::Vacant(slot) => {
                slot.insert(agent);
                Ok(())
            }
        }
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the roster has no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Look up an agent by id.
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Agent in turn slot `slot`.
    pub fn by_slot(&self, slot: usize) -> Option<&Agent> {
        self.agents.get_index(slot).map(|(_, a)| a)
    }

    pub(crate) fn by_slot_mut(&mut self, slot: usize) -> Option<&mut Agent> {
        self.agents.get_index_mut(slot).map(|(_, a)| a)
    }

    /// Agents in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Current cells, in turn order.
    pub fn positions(&self) -> Vec<CellIndex> {
        self.iter().map(Agent::position).collect()
    }

    /// Whether `cell` is some agent's goal.
    pub fn is_goal(&self, cell: CellIndex) -> bool {
        self.iter().any(|a| a.goal() == cell)
    }

    /// Whether every agent stands on its goal. True for an empty roster.
    pub fn all_arrived(&self) -> bool {
        self.iter().all(Agent::has_arrived)
    }
}
