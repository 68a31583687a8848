//! Core data structures for the IntentSim simulation.

pub mod anomaly;
pub mod particle;
pub mod snapshot;
