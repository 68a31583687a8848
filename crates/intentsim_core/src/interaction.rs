//! Pairwise interaction rules.
//!
//! `resolve` is a pure transition over copies of the two particles: the
//! caller decides when to commit the returned pair back into the population.
//! The only side channels are the RNG and the id allocator, both passed in
//! explicitly through [`InteractionContext`].

use crate::config::CompositeMode;
use crate::lifecycle::IdAllocator;
use intentsim_data::{Charge, Particle, ParticleKind};
use rand::Rng;

pub const MEMORY_RETENTION: f64 = 0.95;
pub const MEMORY_REINFORCEMENT: f64 = 0.2;
pub const CLUSTER_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const CLUSTER_CHANCE: f64 = 0.05;
/// Knowledge and energy both sides need before a composite can form.
pub const COMPOSITE_MIN_KNOWLEDGE: f64 = 1.0;
pub const COMPOSITE_MIN_ENERGY: f64 = 0.4;
/// Scale applied to the partner's energy and knowledge after absorption.
pub const ABSORBED_RETENTION: f64 = 0.3;

pub struct InteractionContext<'a, R: Rng> {
    pub learning_rate: f64,
    pub composite_mode: CompositeMode,
    pub ids: &'a mut IdAllocator,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InteractionOutcome {
    pub first: Particle,
    pub second: Particle,
    pub occurred: bool,
    /// Cluster id written to at least one side during this interaction.
    pub cluster_assigned: Option<u64>,
    /// Side that became the surviving composite.
    pub composite: Option<Side>,
    /// Side that must be removed at the end of the step (`CompositeMode::Absorb`).
    pub absorbed: Option<Side>,
}

impl InteractionOutcome {
    fn unchanged(first: Particle, second: Particle) -> Self {
        Self {
            first,
            second,
            occurred: false,
            cluster_assigned: None,
            composite: None,
            absorbed: None,
        }
    }
}

/// Probability that `p1` and `p2` interact.
///
/// The charge pairing picks the base value; adaptive particles add a flat
/// bonus; a quantum participant replaces the whole value with a phase term.
pub fn interaction_chance(p1: &Particle, p2: &Particle) -> f64 {
    let mut chance = match (p1.charge, p2.charge) {
        (Charge::Positive, Charge::Positive) => 0.8,
        (Charge::Negative, Charge::Negative) => 0.3,
        (Charge::Neutral, _) | (_, Charge::Neutral) => 0.5,
        _ => 0.7,
    };

    if p1.is_adaptive() || p2.is_adaptive() {
        chance += 0.1;
    }

    if p1.is_quantum() || p2.is_quantum() {
        let phase_factor = ((p1.phase + p2.phase) / 2.0).sin().abs();
        chance = 0.3 + phase_factor * 0.5;
    }

    chance
}

/// Intent similarity of two particles; always 1.0 while intent is untracked.
pub fn intent_similarity(p1: &Particle, p2: &Particle) -> f64 {
    1.0 - (p1.intent() - p2.intent()).abs()
}

pub fn resolve<R: Rng>(
    p1: &Particle,
    p2: &Particle,
    ctx: &mut InteractionContext<'_, R>,
) -> InteractionOutcome {
    let mut a = p1.clone();
    let mut b = p2.clone();

    if ctx.rng.gen::<f64>() > interaction_chance(&a, &b) {
        return InteractionOutcome::unchanged(a, b);
    }

    let reinforcement = ctx.learning_rate * MEMORY_REINFORCEMENT;
    remember(&mut a, b.id, reinforcement);
    remember(&mut b, a.id, reinforcement);

    let similarity = intent_similarity(&a, &b);
    let transfer =
        a.knowledge.min(b.knowledge) * ctx.learning_rate * (0.2 + similarity * 0.3);
    a.knowledge += transfer;
    b.knowledge += transfer;

    a.interactions += 1;
    b.interactions += 1;
    a.age += 1;
    b.age += 1;

    if a.is_adaptive() {
        a.adaptive_score += 0.05 * ((b.knowledge + b.energy) / 2.0).min(1.0);
    }
    if b.is_adaptive() {
        b.adaptive_score += 0.05 * ((a.knowledge + a.energy) / 2.0).min(1.0);
    }

    let mut cluster_assigned = None;
    if similarity > CLUSTER_SIMILARITY_THRESHOLD && ctx.rng.gen::<f64>() < CLUSTER_CHANCE {
        cluster_assigned = assign_cluster(&mut a, &mut b, ctx.ids);
    }

    let composite = try_form_composite(&mut a, &mut b, ctx.rng);
    let absorbed = match (composite, ctx.composite_mode) {
        (Some(survivor), CompositeMode::Absorb) => Some(survivor.other()),
        _ => None,
    };

    InteractionOutcome {
        first: a,
        second: b,
        occurred: true,
        cluster_assigned,
        composite,
        absorbed,
    }
}

fn remember(particle: &mut Particle, peer: u64, reinforcement: f64) {
    let old = particle.memory_of(peer);
    particle
        .interaction_memory
        .insert(peer, old * MEMORY_RETENTION + reinforcement);
}

/// Two unaffiliated particles found a cluster; one unaffiliated particle
/// joins its partner's. Two affiliated particles keep their own clusters.
fn assign_cluster(a: &mut Particle, b: &mut Particle, ids: &mut IdAllocator) -> Option<u64> {
    match (a.cluster_id, b.cluster_id) {
        (None, None) => {
            let id = ids.cluster_id(a.id, b.id);
            a.cluster_id = Some(id);
            b.cluster_id = Some(id);
            Some(id)
        }
        (Some(id), None) => {
            b.cluster_id = Some(id);
            Some(id)
        }
        (None, Some(id)) => {
            a.cluster_id = Some(id);
            Some(id)
        }
        (Some(_), Some(_)) => None,
    }
}

/// Exactly one side must be positive.
fn charges_complement(a: &Particle, b: &Particle) -> bool {
    (a.charge == Charge::Positive) != (b.charge == Charge::Positive)
}

/// Chance that a qualifying pair forms a composite: ordered (low entropy),
/// older pairs are favored.
pub fn composite_threshold(a: &Particle, b: &Particle) -> f64 {
    let entropy_factor = (2.0 - a.entropy - b.entropy) / 2.0;
    let age_factor = ((a.age + b.age) as f64 / 200.0).min(1.0);
    0.6 * entropy_factor * age_factor
}

fn try_form_composite<R: Rng>(a: &mut Particle, b: &mut Particle, rng: &mut R) -> Option<Side> {
    let qualifies = a.knowledge > COMPOSITE_MIN_KNOWLEDGE
        && b.knowledge > COMPOSITE_MIN_KNOWLEDGE
        && a.energy > COMPOSITE_MIN_ENERGY
        && b.energy > COMPOSITE_MIN_ENERGY;
    if !qualifies {
        return None;
    }

    let threshold = composite_threshold(a, b);
    if !(rng.gen::<f64>() < threshold && charges_complement(a, b)) {
        return None;
    }

    if rng.gen::<f64>() < 0.5 {
        absorb(a, b);
        Some(Side::First)
    } else {
        absorb(b, a);
        Some(Side::Second)
    }
}

fn absorb(survivor: &mut Particle, partner: &mut Particle) {
    survivor.kind = ParticleKind::Composite;
    survivor.complexity += partner.complexity * 0.7;
    survivor.energy += partner.energy * 0.5;
    survivor.knowledge = survivor.knowledge.max(partner.knowledge) * 1.2;
    survivor.entropy = (survivor.entropy + partner.entropy) * 0.4;
    survivor.energy_capacity += partner.energy_capacity * 0.5;
    for (&peer, &strength) in &partner.interaction_memory {
        *survivor.interaction_memory.entry(peer).or_insert(0.0) += strength * 0.5;
    }

    partner.energy *= ABSORBED_RETENTION;
    partner.knowledge *= ABSORBED_RETENTION;
}
