use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Polarity of a particle, fixed at creation from the sampled field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charge {
    Positive,
    Negative,
    Neutral,
}

impl Charge {
    pub const ALL: [Charge; 3] = [Charge::Positive, Charge::Negative, Charge::Neutral];

    /// Classifies a field sample: above 0.3 is positive, below -0.3 negative.
    #[must_use]
    pub fn from_field(value: f64) -> Self {
        if value > 0.3 {
            Charge::Positive
        } else if value < -0.3 {
            Charge::Negative
        } else {
            Charge::Neutral
        }
    }

    /// Sign applied when a particle nudges the field: `+1` for positive, `-1` otherwise.
    #[must_use]
    pub fn field_sign(&self) -> f64 {
        match self {
            Charge::Positive => 1.0,
            Charge::Negative | Charge::Neutral => -1.0,
        }
    }
}

/// Behavioral class of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticleKind {
    Standard,
    Quantum,
    HighEnergy,
    Adaptive,
    Composite,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 5] = [
        ParticleKind::Standard,
        ParticleKind::HighEnergy,
        ParticleKind::Quantum,
        ParticleKind::Composite,
        ParticleKind::Adaptive,
    ];

    /// Field-derived kind from `|value|`: above 0.7 high-energy, above 0.4 quantum.
    #[must_use]
    pub fn from_field(value: f64) -> Self {
        let magnitude = value.abs();
        if magnitude > 0.7 {
            ParticleKind::HighEnergy
        } else if magnitude > 0.4 {
            ParticleKind::Quantum
        } else {
            ParticleKind::Standard
        }
    }
}

/// A single agent embedded in the intent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Unique among live particles only; see `IdScheme` in `intentsim_core`.
    pub id: u64,
    pub charge: Charge,
    pub kind: ParticleKind,
    pub knowledge: f64,
    pub complexity: f64,
    pub energy: f64,
    pub stability: f64,
    pub interactions: u64,
    pub phase: f64,
    pub entropy: f64,
    pub adaptive_score: f64,
    /// `None` when the particle belongs to no cluster.
    pub cluster_id: Option<u64>,
    pub age: u64,
    pub energy_capacity: f64,
    pub decay_rate: f64,
    /// Peer id -> decayed contact strength.
    pub interaction_memory: BTreeMap<u64, f64>,
}

impl Particle {
    /// Intent is never tracked per particle, so every lookup yields the default of 0.
    #[must_use]
    pub fn intent(&self) -> f64 {
        0.0
    }

    #[must_use]
    pub fn is_adaptive(&self) -> bool {
        self.kind == ParticleKind::Adaptive
    }

    #[must_use]
    pub fn is_quantum(&self) -> bool {
        self.kind == ParticleKind::Quantum
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.kind == ParticleKind::Composite
    }

    /// Composite and adaptive particles push back on the field during feedback.
    #[must_use]
    pub fn influences_field(&self) -> bool {
        matches!(self.kind, ParticleKind::Composite | ParticleKind::Adaptive)
    }

    #[must_use]
    pub fn memory_of(&self, peer: u64) -> f64 {
        self.interaction_memory.get(&peer).copied().unwrap_or(0.0)
    }
}
