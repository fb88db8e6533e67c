//! Pairwise transmission between contagious agents and their neighbors.
//!
//! A pass runs in two phases, like an interaction-command buffer: candidate
//! pairs are evaluated against an immutable view of the population, then the
//! successful infections are applied. Sources therefore always see the
//! positions and statuses from before the pass.

use crate::config::AppConfig;
use crate::lifecycle::personal_recovery_time;
use crate::rng::RandomSource;
use crate::spatial_hash::SpatialHash;
use crate::systems::disease;
use crate::zone::ZoneEffects;
use contagion_data::{Agent, AgentId, HealthStatus};

pub const SUPER_SPREADER_MULT: f64 = 3.0;
pub const REINFECTION_SCALE: f64 = 0.1;
pub const REINFECTION_CAP: f64 = 0.05;
/// Protection wanes with longer base illnesses: `1 + recovery_time * 0.2 / 1000`.
pub const REINFECTION_WANING_PER_MS: f64 = 0.2 / 1000.0;
pub const REINFECTION_IMMUNITY_PENALTY: f64 = 0.7;
pub const MIN_IMMUNITY: f64 = 0.2;
/// Lower bound on grid cell size so tiny infection radii do not explode the grid.
pub const MIN_CELL_SIZE: f64 = 8.0;

/// A successful infection, recorded against population indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transmission {
    pub target_idx: usize,
    pub source_idx: usize,
    pub target: AgentId,
    pub source: AgentId,
    pub reinfection: bool,
}

/// Base chance before the distance gate. Zero for ineligible pairs.
pub fn infection_probability(source: &Agent, target: &Agent, config: &AppConfig) -> f64 {
    if !source.is_contagious() || source.is_being_collected || source.id == target.id {
        return 0.0;
    }
    if target.is_being_collected {
        return 0.0;
    }
    let d = &config.disease;
    let base = match target.status {
        HealthStatus::Healthy => d.infection_rate,
        HealthStatus::Recovered => {
            let waning = 1.0 + d.recovery_time * REINFECTION_WANING_PER_MS;
            (d.reinfection_rate * REINFECTION_SCALE / (target.immunity * waning))
                .min(REINFECTION_CAP)
        }
        HealthStatus::Infected | HealthStatus::Deceased => return 0.0,
    };
    let mut probability = base;
    if source.is_super_spreader {
        probability *= SUPER_SPREADER_MULT;
    }
    probability * ZoneEffects::for_membership(target.zones, config).transmission
}

/// Distance gate plus one draw. Does not mutate anything.
fn attempt<R: RandomSource>(
    source: &Agent,
    target: &Agent,
    config: &AppConfig,
    rng: &mut R,
) -> bool {
    let probability = infection_probability(source, target, config);
    if probability <= 0.0 {
        return false;
    }
    if source.position.distance_to(&target.position) >= config.disease.infection_distance {
        return false;
    }
    rng.chance(probability)
}

/// Turns `target` into a fresh infection. Returns whether it was a re-infection.
pub fn apply_infection<R: RandomSource>(target: &mut Agent, config: &AppConfig, rng: &mut R) -> bool {
    let reinfection = target.status == HealthStatus::Recovered;
    if reinfection {
        target.immunity = (target.immunity * REINFECTION_IMMUNITY_PENALTY).max(MIN_IMMUNITY);
    }
    target.status = HealthStatus::Infected;
    target.personal_recovery_time =
        personal_recovery_time(target.has_comorbidities, target.zones, config, rng);
    target.infection = Some(disease::onset(target.personal_recovery_time, &config.disease));
    reinfection
}

/// Single-pair attempt that infects `target` on success.
pub fn try_infect<R: RandomSource>(
    source: &Agent,
    target: &mut Agent,
    config: &AppConfig,
    rng: &mut R,
) -> bool {
    if !attempt(source, target, config, rng) {
        return false;
    }
    apply_infection(target, config, rng);
    true
}

/// Grid sized to the infection radius.
pub fn transmission_grid(config: &AppConfig) -> SpatialHash {
    SpatialHash::new(
        config.disease.infection_distance.max(MIN_CELL_SIZE),
        config.world.width,
        config.world.height,
    )
}

/// Evaluates every contagious agent against its neighbors.
///
/// Sources are visited in population order and their candidates in ascending
/// index, so the random stream is consumed exactly as by a full pairwise scan.
/// A target infected earlier in the pass is not drawn for again.
pub fn collect_transmissions<R: RandomSource>(
    agents: &[Agent],
    grid: &mut SpatialHash,
    config: &AppConfig,
    rng: &mut R,
) -> Vec<Transmission> {
    let mut transmissions = Vec::new();
    if !agents.iter().any(Agent::is_contagious) {
        return transmissions;
    }

    let positions: Vec<(f64, f64)> = agents.iter().map(|a| (a.position.x, a.position.y)).collect();
    grid.build(&positions);

    let mut claimed = vec![false; agents.len()];
    let mut candidates = Vec::new();
    let radius = config.disease.infection_distance;

    for (source_idx, source) in agents.iter().enumerate() {
        if !source.is_contagious() || source.is_being_collected {
            continue;
        }
        grid.query_into(source.position.x, source.position.y, radius, &mut candidates);
        candidates.sort_unstable();

        for &target_idx in &candidates {
            if target_idx == source_idx || claimed[target_idx] {
                continue;
            }
            let target = &agents[target_idx];
            if attempt(source, target, config, rng) {
                claimed[target_idx] = true;
                transmissions.push(Transmission {
                    target_idx,
                    source_idx,
                    target: target.id,
                    source: source.id,
                    reinfection: target.status == HealthStatus::Recovered,
                });
            }
        }
    }
    transmissions
}

/// Runs a full transmission pass: collect against the current view, then apply.
pub fn transmission_pass<R: RandomSource>(
    agents: &mut [Agent],
    grid: &mut SpatialHash,
    config: &AppConfig,
    rng: &mut R,
) -> Vec<Transmission> {
    let transmissions = collect_transmissions(agents, grid, config, rng);
    for t in &transmissions {
        apply_infection(&mut agents[t.target_idx], config, rng);
        tracing::debug!(target = %t.target, source = %t.source, reinfection = t.reinfection, "Infection");
    }
    transmissions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ConstantRandom;
    use contagion_data::{DiseaseStage, Infection, Position, Velocity, ZoneMembership};

    fn agent(id: u32, x: f64, status: HealthStatus) -> Agent {
        let infection = (status == HealthStatus::Infected).then(|| Infection {
            stage: DiseaseStage::Progression,
            ..Infection::onset()
        });
        Agent {
            id: AgentId(id),
            position: Position { x, y: 50.0 },
            velocity: Velocity::default(),
            status,
            infection,
            personal_recovery_time: 1000.0,
            immunity: 0.5,
            has_comorbidities: false,
            is_super_spreader: false,
            zones: ZoneMembership::default(),
            is_being_collected: false,
        }
    }

    #[test]
    fn test_only_progression_transmits() {
        let config = AppConfig::default();
        let mut source = agent(0, 10.0, HealthStatus::Infected);
        let target = agent(1, 11.0, HealthStatus::Healthy);
        assert_eq!(infection_probability(&source, &target, &config), 0.4);
        source.infection.as_mut().unwrap().stage = DiseaseStage::Incubation;
        assert_eq!(infection_probability(&source, &target, &config), 0.0);
    }

    #[test]
    fn test_reinfection_probability_is_capped() {
        let mut config = AppConfig::default();
        let source = agent(0, 10.0, HealthStatus::Infected);
        let mut target = agent(1, 11.0, HealthStatus::Recovered);
        target.immunity = 1.0;
        // 0.1 * 0.1 / (1.0 * 1.4)
        let expected = 0.01 / 1.4;
        assert!((infection_probability(&source, &target, &config) - expected).abs() < 1e-12);

        config.disease.reinfection_rate = 1.0;
        target.immunity = 0.2;
        assert_eq!(infection_probability(&source, &target, &config), REINFECTION_CAP);
    }

    #[test]
    fn test_modifiers_use_target_containment() {
        let config = AppConfig::default();
        let mut source = agent(0, 10.0, HealthStatus::Infected);
        source.is_super_spreader = true;
        source.zones.containment = true;
        let mut target = agent(1, 11.0, HealthStatus::Healthy);
        assert!((infection_probability(&source, &target, &config) - 1.2).abs() < 1e-12);
        target.zones.containment = true;
        assert!((infection_probability(&source, &target, &config) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_distance_gate_is_strict() {
        let mut config = AppConfig::default();
        config.disease.infection_distance = 10.0;
        config.disease.infection_rate = 1.0;
        let source = agent(0, 10.0, HealthStatus::Infected);
        let mut edge = agent(1, 20.0, HealthStatus::Healthy);
        assert!(!try_infect(&source, &mut edge, &config, &mut ConstantRandom(0.0)));
        assert_eq!(edge.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_reinfection_applies_immunity_penalty() {
        let config = AppConfig::default();
        let mut target = agent(1, 11.0, HealthStatus::Recovered);
        target.immunity = 0.25;
        assert!(apply_infection(&mut target, &config, &mut ConstantRandom(0.5)));
        assert_eq!(target.immunity, MIN_IMMUNITY);
        assert_eq!(target.status, HealthStatus::Infected);
        assert_eq!(target.infection, Some(Infection::onset()));
    }

    #[test]
    fn test_pass_skips_deceased_and_claimed() {
        let mut config = AppConfig::default();
        config.disease.infection_rate = 1.0;
        let mut agents = vec![
            agent(0, 10.0, HealthStatus::Infected),
            agent(1, 12.0, HealthStatus::Deceased),
            agent(2, 13.0, HealthStatus::Healthy),
            agent(3, 14.0, HealthStatus::Healthy),
        ];
        agents[3].is_being_collected = true;
        let mut grid = transmission_grid(&config);
        let result = transmission_pass(&mut agents, &mut grid, &config, &mut ConstantRandom(0.0));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].target, AgentId(2));
        assert_eq!(agents[1].status, HealthStatus::Deceased);
        assert_eq!(agents[3].status, HealthStatus::Healthy);
    }

    #[test]
    fn test_newly_infected_do_not_spread_in_same_pass() {
        let mut config = AppConfig::default();
        config.disease.infection_rate = 1.0;
        config.disease.infection_distance = 5.0;
        let mut agents = vec![
            agent(0, 10.0, HealthStatus::Infected),
            agent(1, 14.0, HealthStatus::Healthy),
            agent(2, 18.0, HealthStatus::Healthy),
        ];
        let mut grid = transmission_grid(&config);
        transmission_pass(&mut agents, &mut grid, &config, &mut ConstantRandom(0.0));
        assert_eq!(agents[1].status, HealthStatus::Infected);
        assert_eq!(agents[2].status, HealthStatus::Healthy);
    }

    #[test]
    fn test_target_infected_once_per_pass() {
        let mut config = AppConfig::default();
        config.disease.infection_rate = 1.0;
        let mut agents = vec![
            agent(0, 10.0, HealthStatus::Infected),
            agent(1, 12.0, HealthStatus::Infected),
            agent(2, 11.0, HealthStatus::Healthy),
        ];
        let mut grid = transmission_grid(&config);
        let result = transmission_pass(&mut agents, &mut grid, &config, &mut ConstantRandom(0.0));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source, AgentId(0));
    }
}
