//! Per-step systems driven by the simulation loop.

/// Anomaly detection between consecutive samples
pub mod anomaly;
/// Spawning, field feedback, pairwise interaction pass and culling
pub mod population;
/// Snapshot statistics (counts, entropy, clusters, complexity index)
pub mod stats;
