//! # Contagion Core
//!
//! Deterministic logic of the Contagion epidemic simulator.
//!
//! This crate contains:
//! - Configuration loading and validation
//! - Agent lifecycle and the per-agent health state machine
//! - Treatment and containment zone effects
//! - Disease progression, movement, transmission, and statistics systems
//! - The mortuary service and its collector state machine
//! - Spatial hashing for neighbor queries
//! - Metrics collection and structured logging
//!
//! Every probabilistic operation takes an explicit [`rng::RandomSource`], so
//! a seeded generator reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use contagion_core::config::AppConfig;
//! use contagion_core::lifecycle::create_population;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = AppConfig::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let agents = create_population(&config, &mut rng);
//! assert_eq!(agents.len(), config.world.population);
//! ```

/// Per-agent behavior trait
pub mod agent;
/// Configuration management for simulation parameters
pub mod config;
/// Engine error type
pub mod error;
/// Agent creation and population seeding
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Body collection and the collector state machine
pub mod mortuary;
/// Random source seam for reproducible runs
pub mod rng;
/// Read-only views for renderers
pub mod snapshot;
/// Spatial hashing for proximity queries
pub mod spatial_hash;
/// Disease, movement, transmission, and statistics systems
pub mod systems;
/// Zone placement, membership, and effects
pub mod zone;

pub use agent::AgentLogic;
pub use error::{EngineError, Result};
pub use metrics::{init_logging, Metrics};
pub use mortuary::{CollectorLogic, MortuaryLogic};
pub use rng::{ConstantRandom, RandomSource};
