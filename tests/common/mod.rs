use intentsim_data::{Charge, Particle, ParticleKind};
use intentsim_lib::model::config::RunConfig;
use intentsim_lib::model::field::IntentField;
use intentsim_lib::model::universe::Universe;
use std::collections::BTreeMap;

#[allow(dead_code)]
pub struct UniverseBuilder {
    config: RunConfig,
    particles: Option<Vec<Particle>>,
    field_value: Option<f64>,
}

#[allow(dead_code)]
impl UniverseBuilder {
    pub fn new() -> Self {
        Self {
            config: RunConfig {
                name: "test".to_string(),
                max_particles: 20,
                iterations: 200,
                seed: Some(42),
                ..Default::default()
            },
            particles: None,
            field_value: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut RunConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Replaces the seeded starting population.
    pub fn with_particles(mut self, particles: Vec<Particle>) -> Self {
        self.particles = Some(particles);
        self
    }

    /// Fills the starting field with a single value.
    pub fn with_uniform_field(mut self, value: f64) -> Self {
        self.field_value = Some(value);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn build(self) -> Universe {
        let mut universe = Universe::new(self.config).expect("valid test config");
        if let Some(particles) = self.particles {
            universe.particles = particles;
        }
        if let Some(value) = self.field_value {
            universe.field = IntentField::filled(universe.config.engine.field_size, value);
        }
        universe
    }
}

#[allow(dead_code)]
pub fn particle(id: u64, charge: Charge, kind: ParticleKind) -> Particle {
    Particle {
        id,
        charge,
        kind,
        knowledge: 0.1,
        complexity: 1.0,
        energy: 1.0,
        stability: 0.5,
        interactions: 0,
        phase: 0.0,
        entropy: 0.5,
        adaptive_score: 0.0,
        cluster_id: None,
        age: 0,
        energy_capacity: 1.2,
        decay_rate: 0.0001,
        interaction_memory: BTreeMap::new(),
    }
}
