use crate::field::IntentField;
use intentsim_data::{
    Charge, ClusterAnalysis, Particle, ParticleCounts, ParticleKind, Snapshot,
};
use std::collections::BTreeMap;

/// Weights of the field, type and charge components of system entropy.
pub const FIELD_ENTROPY_WEIGHT: f64 = 0.3;
pub const TYPE_ENTROPY_WEIGHT: f64 = 0.35;
pub const CHARGE_ENTROPY_WEIGHT: f64 = 0.35;

/// Builds the snapshot for the current population and field.
///
/// Every statistic is defined for an empty population: averages fall back to
/// 0, `max_complexity` to 1, and the complexity index stays finite.
pub fn compute_snapshot(
    particles: &[Particle],
    field: &IntentField,
    total_interactions: u64,
    timestamp: u64,
) -> Snapshot {
    let counts = ParticleCounts::tally(particles);
    let cluster_analysis = analyze_clusters(particles);
    let system_entropy = system_entropy(particles, field);

    let n = particles.len();
    let denom = n.max(1) as f64;
    let avg_knowledge = particles.iter().map(|p| p.knowledge).sum::<f64>() / denom;
    let avg_complexity = particles.iter().map(|p| p.complexity).sum::<f64>() / denom;
    let max_knowledge = particles.iter().map(|p| p.knowledge).fold(0.0, f64::max);
    let max_complexity = if particles.is_empty() {
        1.0
    } else {
        particles
            .iter()
            .map(|p| p.complexity)
            .fold(f64::NEG_INFINITY, f64::max)
    };

    let complexity_index = complexity_index(
        &counts,
        n,
        avg_knowledge,
        max_complexity,
        total_interactions,
        &cluster_analysis,
    );

    Snapshot {
        timestamp,
        particle_counts: counts,
        total_particles: n,
        total_interactions,
        avg_knowledge,
        max_knowledge,
        avg_complexity,
        max_complexity,
        complexity_index,
        cluster_analysis,
        system_entropy,
    }
}

/// Groups particles by cluster id, ignoring unaffiliated ones.
///
/// Stability blends the average knowledge (saturating at 10), complexity
/// (saturating at 5) and age (saturating at 500) of clustered particles with
/// weights 0.4, 0.4 and 0.2.
pub fn analyze_clusters(particles: &[Particle]) -> ClusterAnalysis {
    let mut sizes: BTreeMap<u64, usize> = BTreeMap::new();
    let mut knowledge = 0.0;
    let mut complexity = 0.0;
    let mut age = 0.0;

    for p in particles {
        if let Some(cid) = p.cluster_id {
            *sizes.entry(cid).or_insert(0) += 1;
            knowledge += p.knowledge;
            complexity += p.complexity;
            age += p.age as f64;
        }
    }

    let cluster_count = sizes.len();
    if cluster_count == 0 {
        return ClusterAnalysis::default();
    }

    let clustered: usize = sizes.values().sum();
    let clustered_f = clustered as f64;
    let knowledge_factor = (knowledge / clustered_f / 10.0).min(1.0);
    let complexity_factor = (complexity / clustered_f / 5.0).min(1.0);
    let age_factor = (age / clustered_f / 500.0).min(1.0);

    ClusterAnalysis {
        cluster_count,
        average_cluster_size: clustered_f / cluster_count as f64,
        largest_cluster_size: sizes.values().copied().max().unwrap_or(0),
        cluster_stability: knowledge_factor * 0.4 + complexity_factor * 0.4 + age_factor * 0.2,
        cluster_sizes: sizes,
    }
}

/// Shannon entropy (base 2) of a category histogram, normalized by `log2(categories)`.
fn normalized_shannon(counts: &[usize], total: usize) -> f64 {
    if total == 0 || counts.len() < 2 {
        return 0.0;
    }
    let total = total as f64;
    let entropy: f64 = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum();
    entropy / (counts.len() as f64).log2()
}

pub fn type_entropy(particles: &[Particle]) -> f64 {
    let counts = ParticleCounts::tally(particles);
    let histogram: Vec<usize> = ParticleKind::ALL.iter().map(|&k| counts.of_kind(k)).collect();
    normalized_shannon(&histogram, particles.len())
}

pub fn charge_entropy(particles: &[Particle]) -> f64 {
    let counts = ParticleCounts::tally(particles);
    let histogram: Vec<usize> = Charge::ALL.iter().map(|&c| counts.of_charge(c)).collect();
    normalized_shannon(&histogram, particles.len())
}

/// Weighted blend of field, type and charge entropy. Always within `[0, 1]`.
pub fn system_entropy(particles: &[Particle], field: &IntentField) -> f64 {
    field.binary_entropy() * FIELD_ENTROPY_WEIGHT
        + type_entropy(particles) * TYPE_ENTROPY_WEIGHT
        + charge_entropy(particles) * CHARGE_ENTROPY_WEIGHT
}

/// Composite score rewarding knowledge, category diversity, interaction
/// volume and emergent structure.
pub fn complexity_index(
    counts: &ParticleCounts,
    population: usize,
    avg_knowledge: f64,
    max_complexity: f64,
    total_interactions: u64,
    clusters: &ClusterAnalysis,
) -> f64 {
    let n = population as f64;
    let variety_factor = counts.variety_product() / (n * n).max(1.0);
    avg_knowledge * variety_factor
        + total_interactions as f64 / 1000.0
        + counts.composite as f64 * max_complexity
        + counts.adaptive as f64 * 2.0
        + clusters.cluster_count as f64 * clusters.cluster_stability
}
