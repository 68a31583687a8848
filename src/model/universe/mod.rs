use intentsim_core::config::RunConfig;
use intentsim_core::field::IntentField;
use intentsim_core::lifecycle::IdAllocator;
use intentsim_core::metrics::RunMetrics;
use intentsim_data::{Anomaly, Particle, Snapshot, SystemState};
use intentsim_io::storage::RunDocument;
use rand_chacha::ChaCha8Rng;

pub mod finalize;
pub mod init;
pub mod update;

/// One parameterized simulation run.
///
/// Owns every piece of mutable state the run touches: the field, the live
/// population, the single random stream and the recorded time series.
/// Nothing is shared between universes, so independent runs can execute on
/// separate threads.
pub struct Universe {
    pub config: RunConfig,
    pub field: IntentField,
    pub particles: Vec<Particle>,
    /// Completed steps; also the simulation time stamped on samples.
    pub tick: u64,
    pub total_interactions: u64,
    pub snapshots: Vec<Snapshot>,
    pub anomalies: Vec<Anomaly>,
    pub prev_state: SystemState,
    pub ids: IdAllocator,
    pub rng: ChaCha8Rng,
    pub metrics: RunMetrics,
}

impl Universe {
    #[must_use]
    pub fn population(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.tick >= self.config.iterations
    }

    /// Runs the remaining configured iterations.
    pub fn run(&mut self) {
        while !self.is_finished() {
            self.update();
        }
        self.metrics.log_summary();
    }

    /// Consumes the run into its persisted form.
    #[must_use]
    pub fn into_document(self, timestamp: &str) -> RunDocument {
        RunDocument {
            config: self.config,
            data: self.snapshots,
            anomalies: self.anomalies,
            timestamp: timestamp.to_string(),
        }
    }
}
