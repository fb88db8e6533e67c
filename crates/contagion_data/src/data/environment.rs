use super::agent::AgentId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
/// Aggregated population counts, recomputed from the live agent list.
pub struct PopulationStats {
    /// Agents still in the population list, bodies awaiting collection included.
    pub population: usize,
    pub healthy: usize,
    pub infected: usize,
    pub recovered: usize,
    /// Bodies not yet removed by a mortuary.
    pub deceased: usize,
    pub in_treatment_zone: usize,
    pub in_containment_zone: usize,
    /// Infected agents in the progression stage.
    pub contagious: usize,
    /// Cumulative deaths since the last reset.
    pub total_deaths: u64,
    /// Cumulative bodies removed since the last reset.
    pub bodies_processed: u64,
    /// Cumulative infections by transmission since the last reset.
    pub total_infections: u64,
}

impl PopulationStats {
    /// Sum of the four health-state counts.
    pub fn accounted(&self) -> usize {
        self.healthy + self.infected + self.recovered + self.deceased
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
/// Domain events emitted during a tick. Each occurrence is reported once.
pub enum LiveEvent {
    Infected {
        id: AgentId,
        source: AgentId,
        reinfection: bool,
        tick: u64,
    },
    Recovered {
        id: AgentId,
        tick: u64,
    },
    Died {
        id: AgentId,
        tick: u64,
    },
    CollectorDispatched {
        mortuary: u32,
        target: AgentId,
        tick: u64,
    },
    BodyProcessed {
        mortuary: u32,
        id: AgentId,
        tick: u64,
    },
}

impl LiveEvent {
    pub fn tick(&self) -> u64 {
        match self {
            LiveEvent::Infected { tick, .. }
            | LiveEvent::Recovered { tick, .. }
            | LiveEvent::Died { tick, .. }
            | LiveEvent::CollectorDispatched { tick, .. }
            | LiveEvent::BodyProcessed { tick, .. } => *tick,
        }
    }
}
