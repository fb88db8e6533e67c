pub mod disease;
pub mod movement;
pub mod stats;
pub mod transmission;
