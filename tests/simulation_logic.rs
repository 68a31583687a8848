mod common;

use common::{particle, UniverseBuilder};
use intentsim_data::{Charge, ParticleKind};
use intentsim_lib::model::metrics;

#[test]
fn test_samples_taken_on_interval_with_one_based_time() {
    let mut universe = UniverseBuilder::new()
        .with_config(|c| {
            c.iterations = 1000;
            c.max_particles = 12;
        })
        .build();
    universe.run();

    assert_eq!(universe.tick, 1000);
    let times: Vec<u64> = universe.snapshots.iter().map(|s| s.timestamp).collect();
    let expected: Vec<u64> = (0..20).map(|k| k * 50 + 1).collect();
    assert_eq!(times, expected);
}

#[test]
fn test_population_never_exceeds_cap() {
    let mut universe = UniverseBuilder::new()
        .with_config(|c| c.max_particles = 15)
        .build();
    assert_eq!(universe.population(), 7);
    for _ in 0..100 {
        universe.update();
        assert!(universe.population() <= 15);
    }
    assert_eq!(universe.population(), 15);
}

#[test]
fn test_interaction_totals_are_monotone() {
    // The last step (iteration 400) falls on the sampling interval.
    let mut universe = UniverseBuilder::new()
        .with_config(|c| c.iterations = 401)
        .build();
    universe.run();
    assert_eq!(universe.snapshots.last().map(|s| s.timestamp), Some(401));
    let totals: Vec<u64> = universe
        .snapshots
        .iter()
        .map(|s| s.total_interactions)
        .collect();
    assert!(totals.windows(2).all(|w| w[0] <= w[1]));
    assert!(universe.total_interactions > 0);
    assert_eq!(
        universe.snapshots.last().map(|s| s.total_interactions),
        Some(universe.total_interactions)
    );
}

#[test]
fn test_run_metrics_follow_the_universe() {
    let mut universe = UniverseBuilder::new()
        .with_config(|c| c.iterations = 250)
        .build();
    universe.run();
    assert_eq!(universe.metrics.step_count(), 250);
    assert_eq!(universe.metrics.population(), universe.population() as u64);
    assert_eq!(
        universe.metrics.counter(metrics::INTERACTIONS),
        universe.total_interactions
    );
    assert_eq!(
        universe.metrics.counter(metrics::ANOMALIES),
        universe.anomalies.len() as u64
    );
}

#[test]
fn test_no_anomalies_inside_stabilization_window() {
    let mut universe = UniverseBuilder::new()
        .with_config(|c| {
            c.iterations = 600;
            c.max_particles = 40;
            c.use_adaptive = true;
            c.probabilistic_intent = true;
        })
        .build();
    universe.run();
    let stabilization = universe.config.engine.stabilization_steps;
    for a in &universe.anomalies {
        assert!(a.timestamp > stabilization + 1);
        assert!((0.0..=1.0).contains(&a.severity));
    }
    // Anomalies are appended in step order.
    assert!(universe
        .anomalies
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn test_energy_conservation_removes_depleted_particles() {
    let mut weak = particle(0, Charge::Neutral, ParticleKind::Standard);
    weak.energy = 0.1;
    weak.decay_rate = 0.0002;
    let healthy = particle(1, Charge::Neutral, ParticleKind::Standard);

    let mut universe = UniverseBuilder::new()
        .with_config(|c| {
            c.max_particles = 2;
            c.energy_conservation = true;
        })
        .with_particles(vec![weak, healthy])
        .build();

    let report = universe.update();
    assert_eq!(report.removed, 1);
    assert_eq!(universe.population(), 1);
    assert_eq!(universe.particles[0].id, 1);
}

#[test]
fn test_particles_age_every_step() {
    let lonely = particle(0, Charge::Negative, ParticleKind::Standard);
    let mut universe = UniverseBuilder::new()
        .with_config(|c| c.max_particles = 1)
        .with_particles(vec![lonely])
        .build();
    for _ in 0..10 {
        universe.update();
    }
    assert_eq!(universe.particles[0].age, 10);
    assert_eq!(universe.particles[0].interactions, 0);
}

#[test]
fn test_feedback_runs_on_first_step() {
    let mut composite = particle(0, Charge::Positive, ParticleKind::Composite);
    composite.complexity = 50.0;
    let mut universe = UniverseBuilder::new()
        .with_config(|c| {
            c.max_particles = 1;
            c.fluctuation_rate = 0.0;
            c.engine.field_size = 2;
        })
        .with_particles(vec![composite])
        .build();
    universe.update();
    // a nudge of 10 saturates whichever cell it hits
    assert!(universe.field.cells.iter().any(|&v| v == 1.0));
}
