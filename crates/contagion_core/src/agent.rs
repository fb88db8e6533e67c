use crate::config::AppConfig;
use crate::rng::RandomSource;
use crate::systems::disease::{self, Outcome};
use crate::systems::movement::{self, MovementContext};
use crate::systems::transmission;
use crate::zone::membership_at;
use contagion_data::{Agent, Zone};

/// Per-agent behavior: zones, disease, movement, and infection attempts.
pub trait AgentLogic {
    fn refresh_zones(&mut self, zones: &[Zone]);

    /// One tick for a single agent: zones, then disease, then movement.
    ///
    /// Deceased or claimed agents are left untouched. Returns the outcome if
    /// the illness resolved during this tick.
    fn advance<R: RandomSource>(
        &mut self,
        zones: &[Zone],
        delta: f64,
        config: &AppConfig,
        rng: &mut R,
    ) -> Option<Outcome>;

    /// Attempts to infect `target`. Mutates only the target.
    fn try_infect<R: RandomSource>(
        &self,
        target: &mut Agent,
        config: &AppConfig,
        rng: &mut R,
    ) -> bool;
}

impl AgentLogic for Agent {
    fn refresh_zones(&mut self, zones: &[Zone]) {
        if self.is_active() {
            self.zones = membership_at(&self.position, zones);
        }
    }

    fn advance<R: RandomSource>(
        &mut self,
        zones: &[Zone],
        delta: f64,
        config: &AppConfig,
        rng: &mut R,
    ) -> Option<Outcome> {
        if !self.is_active() {
            return None;
        }
        self.refresh_zones(zones);
        let outcome = disease::process_infection(self, delta, config, rng);
        movement::handle_movement(self, &MovementContext { config, delta });
        outcome
    }

    fn try_infect<R: RandomSource>(
        &self,
        target: &mut Agent,
        config: &AppConfig,
        rng: &mut R,
    ) -> bool {
        transmission::try_infect(self, target, config, rng)
    }
}
