use crate::model::error::{EngineError, Result};
use crate::model::systems::disease::Outcome;
use crate::model::systems::transmission;
use crate::model::world::World;
use crate::model::AgentLogic;
use contagion_data::LiveEvent;

impl World {
    /// Advances the simulation by `delta` simulated milliseconds.
    ///
    /// Phases run in a fixed order:
    /// - per agent: zone refresh, disease progression, movement
    /// - transmission against the post-movement population
    /// - mortuary dispatch, collection, and body removal
    /// - statistics and observers
    ///
    /// A zero delta only refreshes zone flags and statistics.
    ///
    /// # Returns
    /// Events that occurred this tick. Every death and every body removal
    /// appears exactly once.
    pub fn update(&mut self, delta: f64) -> Result<Vec<LiveEvent>> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(EngineError::InvalidDelta(delta));
        }
        if delta == 0.0 {
            self.refresh_zone_membership();
            self.refresh_stats();
            return Ok(Vec::new());
        }

        self.tick += 1;
        self.elapsed += delta;

        let mut events = self.pass_agents(delta);
        self.pass_transmission(&mut events);
        self.finalize_tick(delta, &mut events)?;

        Ok(events)
    }

    pub(crate) fn refresh_zone_membership(&mut self) {
        let zones = &self.zones;
        for agent in &mut self.agents {
            agent.refresh_zones(zones);
        }
    }

    fn pass_agents(&mut self, delta: f64) -> Vec<LiveEvent> {
        let tick = self.tick;
        let mut events = Vec::new();
        for agent in &mut self.agents {
            match agent.advance(&self.zones, delta, &self.config, &mut self.rng) {
                Some(Outcome::Died) => {
                    self.tally.total_deaths += 1;
                    tracing::info!(agent = %agent.id, tick, "Agent died");
                    events.push(LiveEvent::Died { id: agent.id, tick });
                }
                Some(Outcome::Recovered) => {
                    events.push(LiveEvent::Recovered { id: agent.id, tick });
                }
                None => {}
            }
        }
        events
    }

    fn pass_transmission(&mut self, events: &mut Vec<LiveEvent>) {
        let tick = self.tick;
        let transmissions = transmission::transmission_pass(
            &mut self.agents,
            &mut self.grid,
            &self.config,
            &mut self.rng,
        );
        self.tally.total_infections += transmissions.len() as u64;
        events.extend(transmissions.into_iter().map(|t| LiveEvent::Infected {
            id: t.target,
            source: t.source,
            reinfection: t.reinfection,
            tick,
        }));
    }
}

#[cfg(test)]
mod tests {
    use crate::model::config::AppConfig;
    use crate::model::error::EngineError;
    use crate::model::world::World;

    fn world() -> World {
        let mut config = AppConfig::default();
        config.world.population = 25;
        config.world.seed = Some(5);
        World::new(config).expect("Failed to create world")
    }

    #[test]
    fn test_rejects_bad_delta() {
        let mut w = world();
        assert!(matches!(w.update(-1.0), Err(EngineError::InvalidDelta(_))));
        assert!(matches!(w.update(f64::NAN), Err(EngineError::InvalidDelta(_))));
        assert_eq!(w.tick, 0);
    }

    #[test]
    fn test_zero_delta_changes_nothing_but_zones() {
        let mut w = world();
        let before: Vec<_> = w.agents.iter().map(|a| (a.position, a.infection)).collect();
        let events = w.update(0.0).expect("tick failed");
        let after: Vec<_> = w.agents.iter().map(|a| (a.position, a.infection)).collect();
        assert!(events.is_empty());
        assert_eq!(before, after);
        assert_eq!(w.tick, 0);
        assert_eq!(w.elapsed, 0.0);
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut w = world();
        w.update(16.0).expect("tick failed");
        w.update(16.0).expect("tick failed");
        assert_eq!(w.tick, 2);
        assert_eq!(w.elapsed, 32.0);
    }
}
