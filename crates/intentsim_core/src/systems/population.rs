use crate::config::RunConfig;
use crate::field::IntentField;
use crate::interaction::{resolve, InteractionContext, Side};
use crate::lifecycle::{create_particle, IdAllocator};
use intentsim_data::Particle;
use rand::Rng;

/// Magnitude of a field nudge per unit of particle complexity.
pub const FEEDBACK_STRENGTH: f64 = 0.2;

/// What happened during one interaction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub interactions: u64,
    pub composites_formed: u64,
    pub clusters_assigned: u64,
    pub removed: usize,
}

/// Builds the starting population from the initial field.
pub fn seed_population<R: Rng>(
    field: &IntentField,
    config: &RunConfig,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Vec<Particle> {
    let count = config.initial_population();
    let mut particles = Vec::with_capacity(config.max_particles);
    for _ in 0..count {
        let value = field.sample(rng);
        let id = ids.particle_id(particles.len());
        particles.push(create_particle(value, id, config.use_adaptive, rng));
    }
    particles
}

/// Adds one particle sampled from `field` if the population is below its cap.
pub fn spawn<R: Rng>(
    particles: &mut Vec<Particle>,
    field: &IntentField,
    config: &RunConfig,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> bool {
    if particles.len() >= config.max_particles {
        return false;
    }
    let value = field.sample(rng);
    let id = ids.particle_id(particles.len());
    particles.push(create_particle(value, id, config.use_adaptive, rng));
    true
}

/// Composite and adaptive particles each push one random cell toward their polarity.
///
/// Returns the number of cells nudged.
pub fn apply_feedback<R: Rng>(particles: &[Particle], field: &mut IntentField, rng: &mut R) -> usize {
    let mut nudged = 0;
    for p in particles.iter().filter(|p| p.influences_field()) {
        let (x, y, z) = field.random_cell(rng);
        field.nudge(x, y, z, FEEDBACK_STRENGTH * p.complexity * p.charge.field_sign());
        nudged += 1;
    }
    nudged
}

/// Decay, aging and the pairwise interaction pass, followed by culling.
///
/// Indices are visited in ascending order and each pair `(i, j > i)` is
/// resolved against the current contents of the population, with the result
/// written back before the next pair. A particle queued for removal (energy
/// below the floor, or absorbed into a composite) takes no further part in
/// the step. The population is rebuilt once, after the pass.
pub fn interact_and_cull<R: Rng>(
    particles: &mut Vec<Particle>,
    config: &RunConfig,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> StepReport {
    let mut report = StepReport::default();
    let n = particles.len();
    let mut queued = vec![false; n];
    let mut ctx = InteractionContext {
        learning_rate: config.learning_rate,
        composite_mode: config.composite_mode,
        ids,
        rng,
    };

    for i in 0..n {
        if queued[i] {
            continue;
        }

        if config.energy_conservation {
            let p = &mut particles[i];
            p.energy *= 1.0 - p.decay_rate;
            if p.energy < config.engine.energy_floor {
                queued[i] = true;
                continue;
            }
        }

        particles[i].age += 1;

        for j in (i + 1)..n {
            if queued[j] {
                continue;
            }

            let outcome = resolve(&particles[i], &particles[j], &mut ctx);
            if outcome.occurred {
                report.interactions += 1;
            }
            if outcome.cluster_assigned.is_some() {
                report.clusters_assigned += 1;
            }
            if outcome.composite.is_some() {
                report.composites_formed += 1;
            }
            let absorbed = outcome.absorbed;
            particles[i] = outcome.first;
            particles[j] = outcome.second;

            match absorbed {
                Some(Side::First) => {
                    queued[i] = true;
                    break;
                }
                Some(Side::Second) => queued[j] = true,
                None => {}
            }
        }
    }

    let before = particles.len();
    let mut idx = 0;
    particles.retain(|_| {
        let keep = !queued[idx];
        idx += 1;
        keep
    });
    report.removed = before - particles.len();

    if report.removed > 0 {
        tracing::debug!(removed = report.removed, remaining = particles.len(), "Culled particles");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompositeMode, IdScheme};
    use intentsim_data::{Charge, ParticleKind};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;

    fn particle(id: u64, charge: Charge) -> Particle {
        Particle {
            id,
            charge,
            kind: ParticleKind::Standard,
            knowledge: 2.0,
            complexity: 1.0,
            energy: 1.0,
            stability: 0.5,
            interactions: 0,
            phase: 0.0,
            entropy: 0.5,
            adaptive_score: 0.0,
            cluster_id: None,
            age: 0,
            energy_capacity: 1.0,
            decay_rate: 0.0001,
            interaction_memory: BTreeMap::new(),
        }
    }

    #[test]
    fn test_seed_population_is_half_capacity_with_sequential_ids() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let field = IntentField::uniform(10, &mut rng);
        let config = RunConfig {
            max_particles: 20,
            ..Default::default()
        };
        let mut ids = IdAllocator::new(IdScheme::PopulationSize);
        let particles = seed_population(&field, &config, &mut ids, &mut rng);
        assert_eq!(particles.len(), 10);
        let got: Vec<u64> = particles.iter().map(|p| p.id).collect();
        assert_eq!(got, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let field = IntentField::uniform(4, &mut rng);
        let config = RunConfig {
            max_particles: 2,
            ..Default::default()
        };
        let mut ids = IdAllocator::new(IdScheme::PopulationSize);
        let mut particles = Vec::new();
        assert!(spawn(&mut particles, &field, &config, &mut ids, &mut rng));
        assert!(spawn(&mut particles, &field, &config, &mut ids, &mut rng));
        assert!(!spawn(&mut particles, &field, &config, &mut ids, &mut rng));
        assert_eq!(particles.len(), 2);
    }

    #[test]
    fn test_feedback_nudges_by_polarity() {
        let mut field = IntentField::filled(1, 0.0);
        let mut positive = particle(0, Charge::Positive);
        positive.kind = ParticleKind::Composite;
        positive.complexity = 2.0;
        let bystander = particle(1, Charge::Positive);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(apply_feedback(&[positive, bystander], &mut field, &mut rng), 1);
        assert!((field.get(0, 0, 0) - 0.4).abs() < 1e-12);

        let mut negative = particle(2, Charge::Neutral);
        negative.kind = ParticleKind::Adaptive;
        apply_feedback(&[negative], &mut field, &mut rng);
        assert!((field.get(0, 0, 0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_low_energy_particles_are_culled_without_aging() {
        let mut weak = particle(0, Charge::Negative);
        weak.energy = 0.05;
        let strong = particle(1, Charge::Negative);
        let mut particles = vec![weak, strong];
        let config = RunConfig {
            energy_conservation: true,
            ..Default::default()
        };
        let mut ids = IdAllocator::new(IdScheme::PopulationSize);
        let mut rng = StepRng::new(u64::MAX, 0);
        let report = interact_and_cull(&mut particles, &config, &mut ids, &mut rng);
        assert_eq!(report.removed, 1);
        assert_eq!(report.interactions, 0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].id, 1);
        assert_eq!(particles[0].age, 1);
    }

    #[test]
    fn test_every_pair_visited_once() {
        let mut particles: Vec<Particle> = (0..4).map(|i| particle(i, Charge::Negative)).collect();
        for p in &mut particles {
            p.knowledge = 0.1;
        }
        let config = RunConfig::default();
        let mut ids = IdAllocator::new(IdScheme::Monotonic);
        let mut rng = StepRng::new(0, 0);
        let report = interact_and_cull(&mut particles, &config, &mut ids, &mut rng);
        assert_eq!(report.interactions, 6);
        assert!(particles.iter().all(|p| p.interactions == 3));
        // one own-turn increment plus one per interaction
        assert!(particles.iter().all(|p| p.age == 4));
    }

    #[test]
    fn test_absorbed_partner_leaves_the_pass() {
        let particles_in = vec![
            particle(0, Charge::Positive),
            particle(1, Charge::Negative),
            particle(2, Charge::Negative),
        ];
        let mut particles = particles_in;
        let config = RunConfig {
            composite_mode: CompositeMode::Absorb,
            ..Default::default()
        };
        let mut ids = IdAllocator::new(IdScheme::Monotonic);
        let mut rng = StepRng::new(0, 0);
        let report = interact_and_cull(&mut particles, &config, &mut ids, &mut rng);
        // (0,1) merges and 1 is dropped; (0,2) merges and 2 is dropped.
        assert_eq!(report.composites_formed, 2);
        assert_eq!(report.removed, 2);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].id, 0);
        assert!(particles[0].is_composite());
    }

    #[test]
    fn test_reduce_mode_keeps_partner() {
        let mut particles = vec![particle(0, Charge::Positive), particle(1, Charge::Negative)];
        let config = RunConfig::default();
        let mut ids = IdAllocator::new(IdScheme::Monotonic);
        let mut rng = StepRng::new(0, 0);
        let report = interact_and_cull(&mut particles, &config, &mut ids, &mut rng);
        assert_eq!(report.composites_formed, 1);
        assert_eq!(report.removed, 0);
        assert_eq!(particles.len(), 2);
        assert!((particles[1].energy - 0.3).abs() < 1e-12);
    }
}
