use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an agent, assigned at population init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World position of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Velocity of an agent, in world units per reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

/// Health state of an agent. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Infected,
    Recovered,
    /// Terminal until the body is removed from the population.
    Deceased,
}

/// Sub-state of [`HealthStatus::Infected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseStage {
    Incubation,
    /// The only stage in which an agent transmits.
    Progression,
    Recovery,
}

/// Disease timer state, present only while infected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Infection {
    /// Elapsed disease time, scaled by the agent's severity factor.
    pub since: f64,
    pub stage: DiseaseStage,
    /// Informational contagiousness curve value in [0.1, 0.9].
    pub contagiousness: f64,
}

impl Infection {
    pub fn onset() -> Self {
        Self {
            since: 0.0,
            stage: DiseaseStage::Incubation,
            contagiousness: 0.1,
        }
    }
}

/// Zone flags recomputed every tick. Never carried across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneMembership {
    pub treatment: bool,
    pub containment: bool,
}

/// Display category a renderer maps to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentCategory {
    Healthy,
    Incubating,
    Progressing,
    Recovering,
    Recovered,
    Deceased,
}

impl AgentCategory {
    pub fn color(self) -> &'static str {
        match self {
            AgentCategory::Healthy => "#4CAF50",
            AgentCategory::Incubating => "#FFA07A",
            AgentCategory::Progressing => "#FF4500",
            AgentCategory::Recovering => "#FF6347",
            AgentCategory::Recovered => "#2196F3",
            AgentCategory::Deceased => "#616161",
        }
    }
}

/// A simulated individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: Position,
    pub velocity: Velocity,
    pub status: HealthStatus,
    /// `Some` if and only if `status == Infected`.
    pub infection: Option<Infection>,
    /// Disease duration fixed at infection onset.
    pub personal_recovery_time: f64,
    /// In [0.2, 1.0]; starts in [0.5, 1.0].
    pub immunity: f64,
    pub has_comorbidities: bool,
    pub is_super_spreader: bool,
    pub zones: ZoneMembership,
    /// Claimed by a collector. Set once, never cleared.
    pub is_being_collected: bool,
}

impl Agent {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status != HealthStatus::Deceased
    }

    #[inline]
    pub fn stage(&self) -> Option<DiseaseStage> {
        self.infection.map(|i| i.stage)
    }

    /// Infected and in the progression stage.
    #[inline]
    pub fn is_contagious(&self) -> bool {
        self.status == HealthStatus::Infected && self.stage() == Some(DiseaseStage::Progression)
    }

    /// Living agents not yet claimed by a collector take part in movement and zones.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_alive() && !self.is_being_collected
    }

    pub fn category(&self) -> AgentCategory {
        match (self.status, self.stage()) {
            (HealthStatus::Healthy, _) => AgentCategory::Healthy,
            (HealthStatus::Recovered, _) => AgentCategory::Recovered,
            (HealthStatus::Deceased, _) => AgentCategory::Deceased,
            (HealthStatus::Infected, Some(DiseaseStage::Progression)) => {
                AgentCategory::Progressing
            }
            (HealthStatus::Infected, Some(DiseaseStage::Recovery)) => AgentCategory::Recovering,
            (HealthStatus::Infected, _) => AgentCategory::Incubating,
        }
    }
}
