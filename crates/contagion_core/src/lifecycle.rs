use crate::config::AppConfig;
use crate::rng::RandomSource;
use crate::systems::disease;
use crate::zone::TREATMENT_RECOVERY_TIME_MULT;
use contagion_data::{Agent, AgentId, HealthStatus, Position, Velocity, ZoneMembership};

/// Base recovery time is doubled before variation is applied.
pub const RECOVERY_TIME_SCALE: f64 = 2.0;
/// Comorbid agents stay ill 50% longer.
pub const COMORBIDITY_RECOVERY_MULT: f64 = 1.5;
pub const COMORBIDITY_PREVALENCE: f64 = 0.2;
pub const SUPER_SPREADER_PREVALENCE: f64 = 0.1;
pub const MIN_INITIAL_IMMUNITY: f64 = 0.5;
pub const MAX_INITIAL_IMMUNITY: f64 = 1.0;

/// Personal illness duration, drawn once at infection onset.
pub fn personal_recovery_time<R: RandomSource>(
    has_comorbidities: bool,
    zones: ZoneMembership,
    config: &AppConfig,
    rng: &mut R,
) -> f64 {
    let d = &config.disease;
    let variation = rng.range(d.min_recovery_variation, d.max_recovery_variation);
    let mut time = d.recovery_time * variation * RECOVERY_TIME_SCALE;
    if has_comorbidities {
        time *= COMORBIDITY_RECOVERY_MULT;
    }
    if zones.treatment {
        time *= TREATMENT_RECOVERY_TIME_MULT;
    }
    time
}

/// Creates an agent at a given position with randomized biology and heading.
pub fn create_agent_with_rng<R: RandomSource>(
    id: AgentId,
    position: Position,
    status: HealthStatus,
    config: &AppConfig,
    rng: &mut R,
) -> Agent {
    let mut velocity = Velocity {
        dx: rng.range(-1.0, 1.0),
        dy: rng.range(-1.0, 1.0),
    };
    if status == HealthStatus::Deceased {
        velocity = Velocity::default();
    }
    let immunity = rng.range(MIN_INITIAL_IMMUNITY, MAX_INITIAL_IMMUNITY);
    let has_comorbidities = rng.chance(COMORBIDITY_PREVALENCE);
    let is_super_spreader = rng.chance(SUPER_SPREADER_PREVALENCE);
    let zones = ZoneMembership::default();
    let personal_recovery_time = personal_recovery_time(has_comorbidities, zones, config, rng);
    let infection = (status == HealthStatus::Infected)
        .then(|| disease::onset(personal_recovery_time, &config.disease));

    Agent {
        id,
        position,
        velocity,
        status,
        infection,
        personal_recovery_time,
        immunity,
        has_comorbidities,
        is_super_spreader,
        zones,
        is_being_collected: false,
    }
}

/// Builds the initial population. The first `initial_infected` agents start infected.
pub fn create_population<R: RandomSource>(config: &AppConfig, rng: &mut R) -> Vec<Agent> {
    let w = &config.world;
    (0..w.population)
        .map(|i| {
            let status = if i < w.initial_infected {
                HealthStatus::Infected
            } else {
                HealthStatus::Healthy
            };
            let position = Position {
                x: rng.range(0.0, w.width),
                y: rng.range(0.0, w.height),
            };
            create_agent_with_rng(AgentId(i as u32), position, status, config, rng)
        })
        .collect()
}
