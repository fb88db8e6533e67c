//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. The engine takes an immutable copy at
//! initialization; changing parameters means calling `reconfigure`, which
//! rebuilds the whole simulation.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1200.0
//! height = 700.0
//! population = 150
//! initial_infected = 5
//! seed = 42
//!
//! [disease]
//! infection_rate = 0.4
//! infection_distance = 20.0
//!
//! [zones]
//! containment_count = 3
//! ```

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

macro_rules! ensure_config {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            return Err(EngineError::config(format!($($arg)+)));
        }
    };
}

/// Simulation speed at which one wall-clock ms is one simulated ms.
pub const REAL_TIME_SPEED: f64 = 60.0;

/// Arena and population parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub population: usize,
    pub initial_infected: usize,
    pub seed: Option<u64>,
    /// Frame length that velocities are expressed against, in ms.
    pub reference_frame_ms: f64,
    /// Speed multiplier; [`REAL_TIME_SPEED`] is real time.
    pub simulation_speed: f64,
    /// Frame rate the runner paces itself against.
    pub target_fps: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 700.0,
            population: 150,
            initial_infected: 5,
            seed: None,
            reference_frame_ms: 16.0,
            simulation_speed: 60.0,
            target_fps: 60,
        }
    }
}

impl WorldConfig {
    /// Wall-clock length of one frame at `target_fps`, in ms.
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps.max(1) as f64
    }
}

/// Disease progression and transmission parameters.
///
/// Durations are in simulated milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DiseaseConfig {
    pub infection_rate: f64,
    pub infection_distance: f64,
    pub recovery_time: f64,
    pub mortality_rate: f64,
    pub reinfection_rate: f64,
    pub incubation_ratio: f64,
    pub progression_ratio: f64,
    pub min_recovery_variation: f64,
    pub max_recovery_variation: f64,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            infection_rate: 0.4,
            infection_distance: 20.0,
            recovery_time: 2000.0,
            mortality_rate: 0.12,
            reinfection_rate: 0.1,
            incubation_ratio: 0.3,
            progression_ratio: 0.5,
            min_recovery_variation: 0.7,
            max_recovery_variation: 1.3,
        }
    }
}

/// Treatment and containment zone layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ZoneConfig {
    pub treatment_count: usize,
    pub treatment_radius: f64,
    pub containment_count: usize,
    pub containment_radius: f64,
    /// Transmission multiplier for targets inside a containment zone.
    pub containment_infection_reduction: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            treatment_count: 4,
            treatment_radius: 35.0,
            containment_count: 3,
            containment_radius: 60.0,
            containment_infection_reduction: 0.5,
        }
    }
}

/// Body collection parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MortuaryConfig {
    pub count: usize,
    /// World units per reference frame.
    pub collector_speed: f64,
    /// Dispatch cooldown, in simulated ms.
    pub collection_interval: f64,
    pub collection_duration: f64,
    pub capture_radius: f64,
}

impl Default for MortuaryConfig {
    fn default() -> Self {
        Self {
            count: 1,
            collector_speed: 2.0,
            collection_interval: 5000.0,
            collection_duration: 2000.0,
            capture_radius: 5.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub disease: DiseaseConfig,
    pub zones: ZoneConfig,
    pub mortuary: MortuaryConfig,
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` describing the
    /// first validation failure. Values are never clamped.
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        ensure_config!(is_positive(w.width), "World width must be positive, got {}", w.width);
        ensure_config!(is_positive(w.height), "World height must be positive, got {}", w.height);
        ensure_config!(
            w.initial_infected <= w.population,
            "Initial infected ({}) exceeds population ({})",
            w.initial_infected,
            w.population
        );
        ensure_config!(
            is_positive(w.reference_frame_ms),
            "Reference frame must be positive"
        );
        ensure_config!(
            is_positive(w.simulation_speed),
            "Simulation speed must be positive"
        );
        ensure_config!(w.target_fps > 0, "Target FPS must be positive");
        ensure_config!(w.target_fps <= 240, "Target FPS too high (max 240)");

        let d = &self.disease;
        ensure_config!(
            is_probability(d.infection_rate),
            "Infection rate must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_probability(d.mortality_rate),
            "Mortality rate must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_probability(d.reinfection_rate),
            "Reinfection rate must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_non_negative(d.infection_distance),
            "Infection distance must be non-negative"
        );
        ensure_config!(
            is_positive(d.recovery_time),
            "Recovery time must be positive"
        );
        ensure_config!(
            is_probability(d.incubation_ratio),
            "Incubation ratio must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_probability(d.progression_ratio),
            "Progression ratio must be in [0.0, 1.0]"
        );
        ensure_config!(
            d.incubation_ratio + d.progression_ratio <= 1.0,
            "Incubation and progression ratios sum to {} (max 1.0)",
            d.incubation_ratio + d.progression_ratio
        );
        ensure_config!(
            is_positive(d.min_recovery_variation),
            "Minimum recovery variation must be positive"
        );
        ensure_config!(
            d.max_recovery_variation.is_finite()
                && d.min_recovery_variation <= d.max_recovery_variation,
            "Recovery variation range is empty ({}..{})",
            d.min_recovery_variation,
            d.max_recovery_variation
        );

        let z = &self.zones;
        ensure_config!(
            is_non_negative(z.treatment_radius),
            "Treatment zone radius must be non-negative"
        );
        ensure_config!(
            is_non_negative(z.containment_radius),
            "Containment zone radius must be non-negative"
        );
        ensure_config!(
            is_probability(z.containment_infection_reduction),
            "Containment infection reduction must be in [0.0, 1.0]"
        );

        let m = &self.mortuary;
        ensure_config!(
            is_positive(m.collector_speed),
            "Collector speed must be positive"
        );
        ensure_config!(
            is_non_negative(m.collection_interval),
            "Collection interval must be non-negative"
        );
        ensure_config!(
            is_non_negative(m.collection_duration),
            "Collection duration must be non-negative"
        );
        ensure_config!(
            is_positive(m.capture_radius),
            "Capture radius must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hex digest of every parameter that affects the dynamics.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.disease).as_bytes());
        hasher.update(format!("{:?}", self.zones).as_bytes());
        hasher.update(format!("{:?}", self.mortuary).as_bytes());
        hex::encode(hasher.finalize())
    }
}
