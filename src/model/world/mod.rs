use crate::model::config::AppConfig;
use crate::model::history::HistoryLogger;
use crate::model::observer::WorldObserver;
use crate::model::snapshot::{
    AgentSnapshot, MortuarySnapshot, WorldSnapshot, ZoneSnapshot,
};
use crate::model::spatial_hash::SpatialHash;
use crate::model::systems::stats::Tally;
use contagion_data::{Agent, AgentId, Mortuary, PopulationStats, Zone};
use rand_chacha::ChaCha8Rng;

pub mod finalize;
pub mod init;
pub mod update;

/// The simulation engine. Sole owner and writer of all agent, zone, and
/// mortuary state; renderers only ever see [`WorldSnapshot`]s.
pub struct World {
    pub width: f64,
    pub height: f64,
    pub tick: u64,
    /// Simulated ms since the last reset. Used as the mortuary clock.
    pub elapsed: f64,
    pub agents: Vec<Agent>,
    pub zones: Vec<Zone>,
    pub mortuaries: Vec<Mortuary>,
    pub pop_stats: PopulationStats,
    pub tally: Tally,
    pub config: AppConfig,
    pub observer: WorldObserver,
    pub logger: HistoryLogger,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) grid: SpatialHash,
}

impl World {
    /// Counts recomputed from the live agent list.
    #[must_use]
    pub fn statistics(&self) -> PopulationStats {
        let mut stats = PopulationStats::default();
        crate::model::systems::stats::update_population_stats(&mut stats, &self.agents, self.tally);
        stats
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    pub fn set_logger(&mut self, logger: HistoryLogger) {
        self.logger = logger;
    }

    #[must_use]
    pub fn create_snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            elapsed: self.elapsed,
            width: self.width,
            height: self.height,
            agents: self.agents.iter().map(AgentSnapshot::from).collect(),
            zones: self.zones.iter().map(ZoneSnapshot::from).collect(),
            mortuaries: self.mortuaries.iter().map(MortuarySnapshot::from).collect(),
            stats: self.pop_stats.clone(),
        }
    }
}
