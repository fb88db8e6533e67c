use super::agent::Position;
use serde::{Deserialize, Serialize};

/// Kind of a special area in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Pharmacy: shorter illness, lower mortality.
    Treatment,
    /// Quarantine: slower movement, reduced transmission, mildly lower mortality.
    Containment,
}

/// Static circular area. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    pub position: Position,
    pub radius: f64,
    pub kind: ZoneKind,
}

impl Zone {
    /// Strictly inside the circle; the rim does not count.
    #[inline]
    pub fn contains(&self, point: &Position) -> bool {
        self.position.distance_to(point) < self.radius
    }
}
