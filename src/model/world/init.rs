use crate::model::config::AppConfig;
use crate::model::error::Result;
use crate::model::history::HistoryLogger;
use crate::model::lifecycle;
use crate::model::mortuary::create_mortuaries;
use crate::model::observer::WorldObserver;
use crate::model::systems::stats::Tally;
use crate::model::systems::transmission::transmission_grid;
use crate::model::world::World;
use crate::model::zone::place_zones;
use contagion_data::PopulationStats;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng_for(config: &AppConfig) -> ChaCha8Rng {
    if let Some(seed) = config.world.seed {
        ChaCha8Rng::seed_from_u64(seed)
    } else {
        ChaCha8Rng::from_entropy()
    }
}

impl World {
    /// Validates `config` and builds zones, population, and mortuaries.
    pub fn new(config: AppConfig) -> Result<Self> {
        let rng = rng_for(&config);
        Self::with_rng(config, rng)
    }

    /// Like [`World::new`] with an explicit generator.
    pub fn with_rng(config: AppConfig, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let mut world = Self {
            width: config.world.width,
            height: config.world.height,
            tick: 0,
            elapsed: 0.0,
            agents: Vec::new(),
            zones: Vec::new(),
            mortuaries: Vec::new(),
            pop_stats: PopulationStats::default(),
            tally: Tally::default(),
            grid: transmission_grid(&config),
            config,
            observer: WorldObserver::new(),
            logger: HistoryLogger::new_dummy(),
            rng,
        };
        world.populate();
        tracing::info!(
            population = world.agents.len(),
            zones = world.zones.len(),
            mortuaries = world.mortuaries.len(),
            fingerprint = %world.config.fingerprint(),
            "World initialized"
        );
        Ok(world)
    }

    fn populate(&mut self) {
        self.zones = place_zones(&self.config, &mut self.rng);
        self.agents = lifecycle::create_population(&self.config, &mut self.rng);
        self.mortuaries = create_mortuaries(&self.config, &mut self.rng);
        self.refresh_zone_membership();
        self.refresh_stats();
    }

    /// Discards all state and rebuilds it from the current configuration.
    ///
    /// A seeded world restarts its generator, so reset runs replay exactly.
    pub fn reset(&mut self) {
        if self.config.world.seed.is_some() {
            self.rng = rng_for(&self.config);
        }
        self.tick = 0;
        self.elapsed = 0.0;
        self.tally = Tally::default();
        self.observer = WorldObserver::new();
        self.populate();
        tracing::info!(population = self.agents.len(), "World reset");
    }

    /// Replaces the configuration and rebuilds everything.
    ///
    /// On a validation error the world is left unchanged.
    pub fn reconfigure(&mut self, config: AppConfig) -> Result<()> {
        config.validate()?;
        self.width = config.world.width;
        self.height = config.world.height;
        self.grid = transmission_grid(&config);
        self.rng = rng_for(&config);
        self.config = config;
        self.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::error::EngineError;

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = AppConfig::default();
        config.world.height = 0.0;
        assert!(matches!(World::new(config), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_seeded_reset_replays_layout() {
        let mut config = AppConfig::default();
        config.world.population = 20;
        config.world.seed = Some(3);
        let mut world = World::new(config).expect("Failed to create world");
        let positions: Vec<_> = world.agents.iter().map(|a| a.position).collect();
        for _ in 0..10 {
            world.update(16.0).expect("tick failed");
        }
        world.reset();
        let again: Vec<_> = world.agents.iter().map(|a| a.position).collect();
        assert_eq!(positions, again);
        assert_eq!(world.tick, 0);
        assert_eq!(world.elapsed, 0.0);
    }

    #[test]
    fn test_reconfigure_rejects_and_keeps_state() {
        let mut config = AppConfig::default();
        config.world.population = 10;
        config.world.seed = Some(1);
        let mut world = World::new(config.clone()).expect("Failed to create world");

        let mut bad = config.clone();
        bad.disease.infection_rate = 2.0;
        assert!(world.reconfigure(bad).is_err());
        assert_eq!(world.agents.len(), 10);

        let mut bigger = config;
        bigger.world.population = 40;
        world.reconfigure(bigger).expect("reconfigure failed");
        assert_eq!(world.agents.len(), 40);
        assert_eq!(world.pop_stats.population, 40);
    }
}
