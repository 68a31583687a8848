use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative regime changes detected between consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    EntropySpike,
    ClusterFormation,
    ClusterDissolution,
    AdaptiveEmergence,
    PhaseTransition,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnomalyKind::EntropySpike => "entropy_spike",
            AnomalyKind::ClusterFormation => "cluster_formation",
            AnomalyKind::ClusterDissolution => "cluster_dissolution",
            AnomalyKind::AdaptiveEmergence => "adaptive_emergence",
            AnomalyKind::PhaseTransition => "phase_transition",
        };
        f.write_str(name)
    }
}

/// An append-only event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub description: String,
    pub affected_particles: usize,
    /// Always within `[0, 1]`.
    pub severity: f64,
}
