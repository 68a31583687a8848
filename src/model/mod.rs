pub use intentsim_core::{CompositeMode, EngineConfig, IdScheme};
pub mod config {
    pub use intentsim_core::config::*;
}
pub mod field {
    pub use intentsim_core::field::*;
}
pub mod interaction {
    pub use intentsim_core::interaction::*;
}
pub mod lifecycle {
    pub use intentsim_core::lifecycle::*;
}
pub mod metrics {
    pub use intentsim_core::metrics::*;
}
pub mod systems {
    pub use intentsim_core::systems::*;
}
pub mod persistence {
    pub use intentsim_io::storage::*;
}
pub mod state {
    pub use intentsim_data::*;
}

pub mod universe;
