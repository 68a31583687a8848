//! Per-run counters and structured logging.
//!
//! Each run owns its own `RunMetrics`, so parallel runs never share counters.

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const INTERACTIONS: &str = "interactions";
pub const COMPOSITES_FORMED: &str = "composites_formed";
pub const CLUSTERS_ASSIGNED: &str = "clusters_assigned";
pub const PARTICLES_REMOVED: &str = "particles_removed";
pub const ANOMALIES: &str = "anomalies";

/// Steps between periodic progress lines.
const LOG_EVERY: u64 = 100;

pub struct RunMetrics {
    run: String,
    step_count: u64,
    population: u64,
    counters: HashMap<String, u64>,
    start_time: Instant,
}

impl RunMetrics {
    #[must_use]
    pub fn new(run: &str) -> Self {
        Self {
            run: run.to_string(),
            step_count: 0,
            population: 0,
            counters: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step.
    pub fn record_step(&mut self, duration: Duration, population: usize) {
        self.step_count += 1;
        self.population = population as u64;

        if self.step_count % LOG_EVERY == 0 {
            tracing::info!(
                run = %self.run,
                step = self.step_count,
                population = population,
                interactions = self.counter(INTERACTIONS),
                duration_us = duration.as_micros() as u64,
                "Simulation step"
            );
        }
    }

    pub fn add(&mut self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        *self.counters.entry(name.to_string()).or_insert(0) += amount;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Final summary line for the run.
    pub fn log_summary(&self) {
        tracing::info!(
            run = %self.run,
            steps = self.step_count(),
            population = self.population(),
            interactions = self.counter(INTERACTIONS),
            composites = self.counter(COMPOSITES_FORMED),
            clusters = self.counter(CLUSTERS_ASSIGNED),
            removed = self.counter(PARTICLES_REMOVED),
            anomalies = self.counter(ANOMALIES),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Run finished"
        );
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
