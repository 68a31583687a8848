use crate::model::universe::Universe;
use intentsim_core::metrics;
use intentsim_core::systems::{anomaly, stats};

impl Universe {
    /// Samples the run when `iteration` falls on the sampling interval.
    ///
    /// Anomaly detection only starts once the stabilization window has
    /// passed, but the previous state is replaced on every sample.
    pub fn finalize_step(&mut self, iteration: u64) {
        if iteration % self.config.sampling_interval != 0 {
            return;
        }

        let snapshot = stats::compute_snapshot(
            &self.particles,
            &self.field,
            self.total_interactions,
            self.tick,
        );
        let current = snapshot.state();

        if iteration > self.config.engine.stabilization_steps {
            let found = anomaly::detect(&self.prev_state, &current, self.particles.len(), self.tick);
            for a in &found {
                tracing::warn!(
                    run = %self.config.name,
                    step = a.timestamp,
                    kind = %a.kind,
                    severity = a.severity,
                    "{}",
                    a.description
                );
            }
            self.metrics.add(metrics::ANOMALIES, found.len() as u64);
            self.anomalies.extend(found);
        }

        self.prev_state = current;
        self.snapshots.push(snapshot);
    }
}
