pub use contagion_core::{AgentLogic, CollectorLogic, MortuaryLogic, RandomSource};
pub mod agent {
    pub use contagion_core::agent::*;
}
pub mod config {
    pub use contagion_core::config::*;
}
pub mod error {
    pub use contagion_core::error::*;
}
pub mod lifecycle {
    pub use contagion_core::lifecycle::*;
}
pub mod metrics {
    pub use contagion_core::metrics::*;
}
pub mod mortuary {
    pub use contagion_core::mortuary::*;
}
pub mod rng {
    pub use contagion_core::rng::*;
}
pub mod snapshot {
    pub use contagion_core::snapshot::*;
}
pub mod spatial_hash {
    pub use contagion_core::spatial_hash::*;
}
pub mod systems {
    pub use contagion_core::systems::*;
}
pub mod zone {
    pub use contagion_core::zone::*;
}
pub mod state {
    pub use contagion_data::*;
}

pub mod history;
pub mod observer;
pub mod world;
