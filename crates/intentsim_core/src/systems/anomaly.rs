use intentsim_data::{Anomaly, AnomalyKind, SystemState};

pub const ENTROPY_SPIKE_THRESHOLD: f64 = 0.15;
pub const CLUSTER_CHANGE_THRESHOLD: i64 = 2;
pub const ADAPTIVE_EMERGENCE_THRESHOLD: i64 = 3;
pub const PHASE_TRANSITION_THRESHOLD: i64 = 5;

/// Compares two consecutive sampled states.
///
/// Kinds are evaluated in a fixed order (entropy, cluster, adaptive, phase)
/// and every kind that fires is returned.
pub fn detect(
    prev: &SystemState,
    curr: &SystemState,
    population: usize,
    timestamp: u64,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    let entropy_change = (curr.entropy - prev.entropy).abs();
    if entropy_change > ENTROPY_SPIKE_THRESHOLD {
        let description = if curr.entropy > prev.entropy {
            "Sudden increase in system entropy (more disorder)"
        } else {
            "Sudden decrease in system entropy (more order)"
        };
        anomalies.push(Anomaly {
            timestamp,
            kind: AnomalyKind::EntropySpike,
            description: description.to_string(),
            affected_particles: population,
            severity: (entropy_change * 2.0).min(1.0),
        });
    }

    let cluster_change = curr.cluster_count as i64 - prev.cluster_count as i64;
    if cluster_change.abs() > CLUSTER_CHANGE_THRESHOLD {
        let (kind, description) = if cluster_change > 0 {
            (
                AnomalyKind::ClusterFormation,
                format!("Rapid formation of {} new clusters", cluster_change),
            )
        } else {
            (
                AnomalyKind::ClusterDissolution,
                format!("Dissolution of {} existing clusters", cluster_change.abs()),
            )
        };
        anomalies.push(Anomaly {
            timestamp,
            kind,
            description,
            affected_particles: (population as f64 * 0.2).round() as usize,
            severity: (cluster_change.abs() as f64 / 5.0).min(1.0),
        });
    }

    let adaptive_change = curr.adaptive_count as i64 - prev.adaptive_count as i64;
    if adaptive_change > ADAPTIVE_EMERGENCE_THRESHOLD {
        anomalies.push(Anomaly {
            timestamp,
            kind: AnomalyKind::AdaptiveEmergence,
            description: format!("Emergence of {} new adaptive particles", adaptive_change),
            affected_particles: adaptive_change as usize,
            severity: (adaptive_change as f64 / 10.0).min(1.0),
        });
    }

    let composite_change = curr.composite_count as i64 - prev.composite_count as i64;
    if composite_change > PHASE_TRANSITION_THRESHOLD
        || (prev.composite_count > 0 && composite_change < -PHASE_TRANSITION_THRESHOLD)
    {
        let description = if composite_change > 0 {
            format!(
                "Rapid composition formation: {} new composite particles",
                composite_change
            )
        } else {
            format!(
                "Major composition breakdown: {} composite particles lost",
                composite_change.abs()
            )
        };
        anomalies.push(Anomaly {
            timestamp,
            kind: AnomalyKind::PhaseTransition,
            description,
            affected_particles: composite_change.unsigned_abs() as usize,
            severity: (composite_change.abs() as f64 / 10.0).min(1.0),
        });
    }

    anomalies
}
