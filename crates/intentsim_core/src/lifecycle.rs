use crate::config::IdScheme;
use intentsim_data::{Charge, Particle, ParticleKind};
use rand::Rng;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Chance that a particle is promoted to adaptive when adaptive particles are enabled.
pub const ADAPTIVE_PROMOTION_CHANCE: f64 = 0.1;

/// Builds a particle from a field sample.
///
/// Charge and kind come from the sample; the remaining scalars are drawn
/// from `rng` in a fixed order so that seeded runs reproduce exactly.
pub fn create_particle<R: Rng>(
    field_value: f64,
    id: u64,
    enable_adaptive: bool,
    rng: &mut R,
) -> Particle {
    let charge = Charge::from_field(field_value);
    let mut kind = ParticleKind::from_field(field_value);
    if enable_adaptive && rng.gen::<f64>() < ADAPTIVE_PROMOTION_CHANCE {
        kind = ParticleKind::Adaptive;
    }

    let knowledge = rng.gen::<f64>() * 0.3;
    let stability = rng.gen::<f64>() * 0.8 + 0.2;
    let phase = rng.gen::<f64>() * PI * 2.0;
    let entropy = rng.gen::<f64>();
    let energy_capacity = 1.0 + rng.gen::<f64>() * 0.5;
    let decay_rate = 0.0001 + rng.gen::<f64>() * 0.0001;

    Particle {
        id,
        charge,
        kind,
        knowledge,
        complexity: 1.0,
        energy: field_value.abs() * 2.0,
        stability,
        interactions: 0,
        phase,
        entropy,
        adaptive_score: if kind == ParticleKind::Adaptive { 1.0 } else { 0.0 },
        cluster_id: None,
        age: 0,
        energy_capacity,
        decay_rate,
        interaction_memory: BTreeMap::new(),
    }
}

/// Hands out particle and cluster ids according to the configured scheme.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    scheme: IdScheme,
    next_particle: u64,
    next_cluster: u64,
}

impl IdAllocator {
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            scheme,
            next_particle: 0,
            next_cluster: 0,
        }
    }

    /// Id for a particle joining a population of `live_population` particles.
    pub fn particle_id(&mut self, live_population: usize) -> u64 {
        match self.scheme {
            IdScheme::PopulationSize => live_population as u64,
            IdScheme::Monotonic => {
                let id = self.next_particle;
                self.next_particle += 1;
                id
            }
        }
    }

    /// Id for a cluster founded by two unaffiliated particles.
    pub fn cluster_id(&mut self, first: u64, second: u64) -> u64 {
        match self.scheme {
            IdScheme::PopulationSize => first.max(second) + 1,
            IdScheme::Monotonic => {
                let id = self.next_cluster;
                self.next_cluster += 1;
                id
            }
        }
    }
}
