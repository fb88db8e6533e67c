//! Contagion: an agent-based epidemic simulator.
//!
//! The [`model::world::World`] engine owns the population, zones, and
//! mortuaries; [`app::Runner`] drives it from wall-clock frames.

pub mod app;
pub mod model;
