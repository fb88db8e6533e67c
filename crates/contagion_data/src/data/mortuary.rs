use super::agent::{AgentId, Position};
use serde::{Deserialize, Serialize};

/// Retrieval state of a collector unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectorState {
    EnRoute,
    Collecting,
    Returning,
}

/// Mobile unit retrieving one deceased agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collector {
    pub position: Position,
    /// The mortuary it returns to.
    pub home: Position,
    pub target: AgentId,
    /// World units per reference frame.
    pub speed: f64,
    pub state: CollectorState,
    /// Accumulated time spent in `Collecting`.
    pub collection_time: f64,
    pub is_done: bool,
    /// Guards the body-processed notification.
    pub has_reported: bool,
}

/// Body-collection depot with its active collectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mortuary {
    pub id: u32,
    pub position: Position,
    /// Minimum simulated time between two dispatches.
    pub cooldown: f64,
    pub last_dispatch: f64,
    pub collectors: Vec<Collector>,
}
