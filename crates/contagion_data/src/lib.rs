//! Core data structures for the Contagion epidemic simulation.
//!
//! Everything here is plain, serializable state. Behavior lives in
//! `contagion_core`; the engine in the root crate owns the only mutable copy.

pub mod data;

pub use data::agent::{
    Agent, AgentCategory, AgentId, DiseaseStage, HealthStatus, Infection, Position, Velocity,
    ZoneMembership,
};
pub use data::environment::{LiveEvent, PopulationStats};
pub use data::mortuary::{Collector, CollectorState, Mortuary};
pub use data::zone::{Zone, ZoneKind};
