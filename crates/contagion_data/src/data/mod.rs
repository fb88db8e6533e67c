//! Core data structures for the Contagion simulation.

pub mod agent;
pub mod environment;
pub mod mortuary;
pub mod zone;
