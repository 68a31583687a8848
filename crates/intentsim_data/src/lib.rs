//! Core data structures for the IntentSim simulation.
//!
//! Everything in this crate is plain data: the engine in `intentsim_core`
//! mutates these records, and `intentsim_io` persists them.

pub mod data;

pub use data::anomaly::{Anomaly, AnomalyKind};
pub use data::particle::{Charge, Particle, ParticleKind};
pub use data::snapshot::{ClusterAnalysis, ParticleCounts, Snapshot, SystemState};
