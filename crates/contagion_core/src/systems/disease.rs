//! Disease system - stage progression, contagiousness, and outcome resolution.

use crate::config::{AppConfig, DiseaseConfig};
use crate::rng::RandomSource;
use crate::zone::ZoneEffects;
use contagion_data::{Agent, DiseaseStage, HealthStatus, Infection, Velocity, ZoneMembership};
use std::f64::consts::PI;

/// Severity baseline; the disease clock runs at `SEVERITY_BASE - immunity`.
pub const SEVERITY_BASE: f64 = 1.7;
pub const COMORBIDITY_SEVERITY_MULT: f64 = 1.2;
/// Mortality baseline; death chance scales with `MORTALITY_BASE - immunity`.
pub const MORTALITY_BASE: f64 = 2.0;
pub const COMORBIDITY_DEATH_MULT: f64 = 2.0;
pub const RECOVERY_IMMUNITY_GAIN: f64 = 0.3;

/// Result of a finished illness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Recovered,
    Died,
}

/// Stage boundaries of one illness, in disease-clock units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTimeline {
    pub incubation_end: f64,
    pub progression_end: f64,
    pub total: f64,
}

impl StageTimeline {
    pub fn new(personal_recovery_time: f64, disease: &DiseaseConfig) -> Self {
        let incubation = personal_recovery_time * disease.incubation_ratio;
        let progression = personal_recovery_time * disease.progression_ratio;
        Self {
            incubation_end: incubation,
            progression_end: incubation + progression,
            total: personal_recovery_time,
        }
    }

    pub fn stage_at(&self, since: f64) -> DiseaseStage {
        if since < self.incubation_end {
            DiseaseStage::Incubation
        } else if since < self.progression_end {
            DiseaseStage::Progression
        } else {
            DiseaseStage::Recovery
        }
    }

    /// Rises 0.1 to 0.5 in incubation, peaks at 0.9 mid-progression, falls 0.3 to 0.1.
    pub fn contagiousness_at(&self, since: f64) -> f64 {
        match self.stage_at(since) {
            DiseaseStage::Incubation => 0.1 + 0.4 * fraction(since, 0.0, self.incubation_end),
            DiseaseStage::Progression => {
                let progress = fraction(since, self.incubation_end, self.progression_end);
                0.5 + 0.4 * (progress * PI).sin()
            }
            DiseaseStage::Recovery => {
                0.3 - 0.2 * fraction(since, self.progression_end, self.total).min(1.0)
            }
        }
    }
}

fn fraction(value: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span <= 0.0 {
        1.0
    } else {
        (value - start) / span
    }
}

/// Fresh infection whose stage agrees with a zero disease clock.
pub fn onset(personal_recovery_time: f64, disease: &DiseaseConfig) -> Infection {
    let timeline = StageTimeline::new(personal_recovery_time, disease);
    Infection {
        since: 0.0,
        stage: timeline.stage_at(0.0),
        contagiousness: timeline.contagiousness_at(0.0),
    }
}

/// Rate at which the disease clock advances relative to simulated time.
pub fn severity_factor(agent: &Agent, config: &AppConfig) -> f64 {
    let mut severity = SEVERITY_BASE - agent.immunity;
    if agent.has_comorbidities {
        severity *= COMORBIDITY_SEVERITY_MULT;
    }
    severity * ZoneEffects::for_membership(agent.zones, config).severity
}

pub fn death_chance(agent: &Agent, config: &AppConfig) -> f64 {
    let mut chance = config.disease.mortality_rate * (MORTALITY_BASE - agent.immunity);
    if agent.has_comorbidities {
        chance *= COMORBIDITY_DEATH_MULT;
    }
    chance * ZoneEffects::for_membership(agent.zones, config).death
}

/// Restores the infection-data invariant after a logic fault.
///
/// Returns `false` if the agent had to be corrected.
pub fn check_infection_invariant(agent: &mut Agent, config: &AppConfig) -> bool {
    let infected = agent.status == HealthStatus::Infected;
    if infected == agent.infection.is_some() {
        return true;
    }
    debug_assert!(
        false,
        "agent {} has status {:?} with infection {:?}",
        agent.id, agent.status, agent.infection
    );
    tracing::warn!(
        agent = %agent.id,
        status = ?agent.status,
        "infection data out of sync with health status, correcting"
    );
    restore_infection(agent, &config.disease);
    false
}

/// Rebuilds the infection data from the health status.
fn restore_infection(agent: &mut Agent, disease: &DiseaseConfig) {
    agent.infection = (agent.status == HealthStatus::Infected)
        .then(|| onset(agent.personal_recovery_time, disease));
}

/// Advances the illness of an infected agent by `delta` simulated ms.
///
/// Returns the outcome if the illness ended this step. Non-infected agents
/// are left untouched.
pub fn process_infection<R: RandomSource>(
    agent: &mut Agent,
    delta: f64,
    config: &AppConfig,
    rng: &mut R,
) -> Option<Outcome> {
    if agent.status != HealthStatus::Infected {
        return None;
    }
    check_infection_invariant(agent, config);

    let severity = severity_factor(agent, config);
    let timeline = StageTimeline::new(agent.personal_recovery_time, &config.disease);
    let infection = agent.infection.as_mut()?;
    infection.since += delta * severity;

    if infection.since >= timeline.total {
        return Some(finish_treatment(agent, config, rng));
    }
    infection.stage = timeline.stage_at(infection.since);
    infection.contagiousness = timeline.contagiousness_at(infection.since);
    None
}

/// Resolves a finished illness with a single draw and clears the disease fields.
pub fn finish_treatment<R: RandomSource>(
    agent: &mut Agent,
    config: &AppConfig,
    rng: &mut R,
) -> Outcome {
    let outcome = if rng.chance(death_chance(agent, config)) {
        agent.status = HealthStatus::Deceased;
        agent.velocity = Velocity::default();
        agent.zones = ZoneMembership::default();
        Outcome::Died
    } else {
        agent.status = HealthStatus::Recovered;
        agent.immunity = (agent.immunity + RECOVERY_IMMUNITY_GAIN).min(1.0);
        Outcome::Recovered
    };
    agent.infection = None;
    outcome
}
