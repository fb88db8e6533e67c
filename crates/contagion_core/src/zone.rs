//! Treatment and containment zones: placement, membership, and effects.

use crate::config::AppConfig;
use crate::rng::RandomSource;
use contagion_data::{Position, Zone, ZoneKind, ZoneMembership};

/// Personal recovery time multiplier when infected inside a treatment zone.
pub const TREATMENT_RECOVERY_TIME_MULT: f64 = 0.8;
/// Disease clock multiplier while inside a treatment zone.
pub const TREATMENT_SEVERITY_MULT: f64 = 0.7;
pub const TREATMENT_DEATH_MULT: f64 = 0.3;
pub const CONTAINMENT_SPEED_MULT: f64 = 0.5;
pub const CONTAINMENT_DEATH_MULT: f64 = 0.8;

/// Multipliers applied to an agent standing in a zone of one kind.
///
/// A multiplier of 1.0 means the kind has no effect on that quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneEffects {
    pub recovery_time: f64,
    pub severity: f64,
    pub death: f64,
    pub speed: f64,
    pub transmission: f64,
}

impl ZoneEffects {
    pub const NEUTRAL: ZoneEffects = ZoneEffects {
        recovery_time: 1.0,
        severity: 1.0,
        death: 1.0,
        speed: 1.0,
        transmission: 1.0,
    };

    pub fn for_kind(kind: ZoneKind, config: &AppConfig) -> Self {
        match kind {
            ZoneKind::Treatment => ZoneEffects {
                recovery_time: TREATMENT_RECOVERY_TIME_MULT,
                severity: TREATMENT_SEVERITY_MULT,
                death: TREATMENT_DEATH_MULT,
                ..Self::NEUTRAL
            },
            ZoneKind::Containment => ZoneEffects {
                death: CONTAINMENT_DEATH_MULT,
                speed: CONTAINMENT_SPEED_MULT,
                transmission: config.zones.containment_infection_reduction,
                ..Self::NEUTRAL
            },
        }
    }

    /// Combined effects for a membership. Kinds multiply.
    pub fn for_membership(zones: ZoneMembership, config: &AppConfig) -> Self {
        let mut effects = Self::NEUTRAL;
        if zones.treatment {
            effects = effects.combine(Self::for_kind(ZoneKind::Treatment, config));
        }
        if zones.containment {
            effects = effects.combine(Self::for_kind(ZoneKind::Containment, config));
        }
        effects
    }

    fn combine(self, other: ZoneEffects) -> Self {
        ZoneEffects {
            recovery_time: self.recovery_time * other.recovery_time,
            severity: self.severity * other.severity,
            death: self.death * other.death,
            speed: self.speed * other.speed,
            transmission: self.transmission * other.transmission,
        }
    }
}

/// Membership is an OR across every zone of the same kind.
pub fn membership_at(position: &Position, zones: &[Zone]) -> ZoneMembership {
    let mut membership = ZoneMembership::default();
    for zone in zones {
        if zone.contains(position) {
            match zone.kind {
                ZoneKind::Treatment => membership.treatment = true,
                ZoneKind::Containment => membership.containment = true,
            }
        }
    }
    membership
}

/// Places the configured zones uniformly over the arena.
pub fn place_zones<R: RandomSource>(config: &AppConfig, rng: &mut R) -> Vec<Zone> {
    let layout = [
        (
            ZoneKind::Treatment,
            config.zones.treatment_count,
            config.zones.treatment_radius,
        ),
        (
            ZoneKind::Containment,
            config.zones.containment_count,
            config.zones.containment_radius,
        ),
    ];
    let mut zones = Vec::with_capacity(layout.iter().map(|l| l.1).sum());
    for (kind, count, radius) in layout {
        for _ in 0..count {
            zones.push(Zone {
                id: zones.len() as u32,
                position: Position {
                    x: rng.range(0.0, config.world.width),
                    y: rng.range(0.0, config.world.height),
                },
                radius,
                kind,
            });
        }
    }
    zones
}
