use super::particle::{Charge, Particle, ParticleKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category population counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub high_energy: usize,
    pub quantum: usize,
    pub standard: usize,
    pub composite: usize,
    pub adaptive: usize,
}

impl ParticleCounts {
    #[must_use]
    pub fn tally(particles: &[Particle]) -> Self {
        let mut counts = Self::default();
        for p in particles {
            match p.charge {
                Charge::Positive => counts.positive += 1,
                Charge::Negative => counts.negative += 1,
                Charge::Neutral => counts.neutral += 1,
            }
            match p.kind {
                ParticleKind::HighEnergy => counts.high_energy += 1,
                ParticleKind::Quantum => counts.quantum += 1,
                ParticleKind::Standard => counts.standard += 1,
                ParticleKind::Composite => counts.composite += 1,
                ParticleKind::Adaptive => counts.adaptive += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn of_charge(&self, charge: Charge) -> usize {
        match charge {
            Charge::Positive => self.positive,
            Charge::Negative => self.negative,
            Charge::Neutral => self.neutral,
        }
    }

    #[must_use]
    pub fn of_kind(&self, kind: ParticleKind) -> usize {
        match kind {
            ParticleKind::HighEnergy => self.high_energy,
            ParticleKind::Quantum => self.quantum,
            ParticleKind::Standard => self.standard,
            ParticleKind::Composite => self.composite,
            ParticleKind::Adaptive => self.adaptive,
        }
    }

    /// Product of `(count + 1)` over the seven diversity categories.
    ///
    /// Standard particles are not a diversity category and are left out.
    #[must_use]
    pub fn variety_product(&self) -> f64 {
        [
            self.positive,
            self.negative,
            self.neutral,
            self.high_energy,
            self.quantum,
            self.composite,
            self.adaptive,
        ]
        .iter()
        .map(|&c| (c + 1) as f64)
        .product()
    }
}

/// Grouping of particles by shared cluster id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterAnalysis {
    pub cluster_count: usize,
    pub average_cluster_size: f64,
    pub largest_cluster_size: usize,
    pub cluster_stability: f64,
    #[serde(default)]
    pub cluster_sizes: BTreeMap<u64, usize>,
}

/// The slice of a snapshot the anomaly detector compares between samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    pub entropy: f64,
    pub cluster_count: usize,
    pub adaptive_count: usize,
    pub composite_count: usize,
}

/// Aggregate statistics sampled at a fixed step interval. Never revised once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulation time (1-based step count) at which the sample was taken.
    pub timestamp: u64,
    pub particle_counts: ParticleCounts,
    pub total_particles: usize,
    pub total_interactions: u64,
    pub avg_knowledge: f64,
    #[serde(default)]
    pub max_knowledge: f64,
    pub avg_complexity: f64,
    pub max_complexity: f64,
    pub complexity_index: f64,
    pub cluster_analysis: ClusterAnalysis,
    pub system_entropy: f64,
}

impl Snapshot {
    #[must_use]
    pub fn state(&self) -> SystemState {
        SystemState {
            entropy: self.system_entropy,
            cluster_count: self.cluster_analysis.cluster_count,
            adaptive_count: self.particle_counts.adaptive,
            composite_count: self.particle_counts.composite,
        }
    }
}
