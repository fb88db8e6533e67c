use contagion_data::{
    Agent, AgentCategory, AgentId, Collector, CollectorState, DiseaseStage, HealthStatus,
    Mortuary, PopulationStats, Zone, ZoneKind,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub x: f64,
    pub y: f64,
    pub status: HealthStatus,
    pub stage: Option<DiseaseStage>,
    pub category: AgentCategory,
    pub color: String,
    pub contagiousness: Option<f64>,
    pub in_treatment_zone: bool,
    pub in_containment_zone: bool,
    pub is_being_collected: bool,
}

impl From<&Agent> for AgentSnapshot {
    fn from(a: &Agent) -> Self {
        let category = a.category();
        Self {
            id: a.id,
            x: a.position.x,
            y: a.position.y,
            status: a.status,
            stage: a.stage(),
            category,
            color: category.color().to_string(),
            contagiousness: a.infection.map(|i| i.contagiousness),
            in_treatment_zone: a.zones.treatment,
            in_containment_zone: a.zones.containment,
            is_being_collected: a.is_being_collected,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ZoneSnapshot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub kind: ZoneKind,
}

impl From<&Zone> for ZoneSnapshot {
    fn from(z: &Zone) -> Self {
        Self {
            id: z.id,
            x: z.position.x,
            y: z.position.y,
            radius: z.radius,
            kind: z.kind,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CollectorSnapshot {
    pub x: f64,
    pub y: f64,
    pub state: CollectorState,
    pub target: AgentId,
}

impl From<&Collector> for CollectorSnapshot {
    fn from(c: &Collector) -> Self {
        Self {
            x: c.position.x,
            y: c.position.y,
            state: c.state,
            target: c.target,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MortuarySnapshot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub collectors: Vec<CollectorSnapshot>,
}

impl From<&Mortuary> for MortuarySnapshot {
    fn from(m: &Mortuary) -> Self {
        Self {
            id: m.id,
            x: m.position.x,
            y: m.position.y,
            collectors: m.collectors.iter().map(CollectorSnapshot::from).collect(),
        }
    }
}

/// Read-only view of the whole simulation for renderers and reports.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    /// Simulated ms since the last reset.
    pub elapsed: f64,
    pub width: f64,
    pub height: f64,
    pub agents: Vec<AgentSnapshot>,
    pub zones: Vec<ZoneSnapshot>,
    pub mortuaries: Vec<MortuarySnapshot>,
    pub stats: PopulationStats,
}
