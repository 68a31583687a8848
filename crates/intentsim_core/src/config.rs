//! Configuration management for simulation runs.
//!
//! A configuration file describes a batch of independent runs plus where
//! their output goes. Every run record is echoed verbatim into its persisted
//! document, so the fields here are part of the output format.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (the four reference runs in `AppConfig::default`)
//! 2. `intentsim.toml` (replaces the run list and output settings)
//! 3. CLI overrides (`--seed`, `--iterations`, `--run`)
//!
//! ## Example `intentsim.toml`
//!
//! ```toml
//! [output]
//! data_dir = "data"
//!
//! [[runs]]
//! name = "baseline"
//! max_particles = 100
//! learning_rate = 0.1
//! fluctuation_rate = 0.01
//! use_adaptive = false
//! energy_conservation = false
//! probabilistic_intent = false
//! iterations = 1000
//! seed = 42
//! composite_mode = "Absorb"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// What happens to the weaker partner when a composite forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompositeMode {
    /// The partner keeps living with energy and knowledge scaled to 0.3x.
    #[default]
    Reduce,
    /// The partner is scaled as in `Reduce` and also queued for end-of-step removal.
    Absorb,
}

/// How particle and cluster ids are allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IdScheme {
    /// Particle id = live population size at creation; cluster id = `max(id1, id2) + 1`.
    /// Ids are unique among live particles only and cluster ids may collide with
    /// later particle ids.
    #[default]
    PopulationSize,
    /// Run-scoped counters for particles and clusters.
    Monotonic,
}

/// Step cadences and constants of the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Side length of the cubic intent field.
    pub field_size: usize,
    pub field_refresh_interval: u64,
    /// Must be a multiple of `field_refresh_interval` to ever fire.
    pub feedback_interval: u64,
    /// Anomaly detection is skipped at or before this iteration.
    pub stabilization_steps: u64,
    /// Particles below this energy are removed when energy conservation is on.
    pub energy_floor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            field_size: 10,
            field_refresh_interval: 50,
            feedback_interval: 100,
            stabilization_steps: 100,
            energy_floor: 0.1,
        }
    }
}

fn default_sampling_interval() -> u64 {
    50
}

/// One parameterized simulation run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub name: String,
    pub max_particles: usize,
    pub learning_rate: f64,
    pub fluctuation_rate: f64,
    pub use_adaptive: bool,
    pub energy_conservation: bool,
    pub probabilistic_intent: bool,
    pub iterations: u64,
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub composite_mode: CompositeMode,
    #[serde(default)]
    pub id_scheme: IdScheme,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: "baseline".to_string(),
            max_particles: 100,
            learning_rate: 0.1,
            fluctuation_rate: 0.01,
            use_adaptive: false,
            energy_conservation: false,
            probabilistic_intent: false,
            iterations: 1000,
            sampling_interval: default_sampling_interval(),
            seed: None,
            composite_mode: CompositeMode::default(),
            id_scheme: IdScheme::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl RunConfig {
    /// Validates the run parameters.
    ///
    /// Returns `Err` describing the first invalid parameter. A failing run is
    /// rejected before its loop starts; other runs in the batch are unaffected.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.name.trim().is_empty(), "Run name must not be empty");
        anyhow::ensure!(
            !self.name.contains(|c| c == '/' || c == '\\'),
            "Run name must not contain path separators"
        );
        anyhow::ensure!(self.max_particles > 0, "Max particles must be positive");
        anyhow::ensure!(
            self.max_particles <= 10000,
            "Max particles too large (max 10000)"
        );
        anyhow::ensure!(
            self.learning_rate.is_finite() && (0.0..=1.0).contains(&self.learning_rate),
            "Learning rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.fluctuation_rate.is_finite() && (0.0..=1.0).contains(&self.fluctuation_rate),
            "Fluctuation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(self.iterations > 0, "Iterations must be positive");
        anyhow::ensure!(
            self.sampling_interval > 0,
            "Sampling interval must be positive"
        );

        anyhow::ensure!(self.engine.field_size > 0, "Field size must be positive");
        anyhow::ensure!(
            self.engine.field_size <= 100,
            "Field size too large (max 100)"
        );
        anyhow::ensure!(
            self.engine.field_refresh_interval > 0,
            "Field refresh interval must be positive"
        );
        anyhow::ensure!(
            self.engine.feedback_interval > 0,
            "Feedback interval must be positive"
        );
        anyhow::ensure!(
            self.engine.energy_floor.is_finite() && self.engine.energy_floor >= 0.0,
            "Energy floor must be non-negative"
        );
        Ok(())
    }

    /// Number of particles seeded before the first step.
    #[must_use]
    pub fn initial_population(&self) -> usize {
        self.max_particles / 2
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    pub runs: Vec<RunConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            runs: vec![
                RunConfig::default(),
                RunConfig {
                    name: "adaptive_probabilistic".to_string(),
                    max_particles: 150,
                    learning_rate: 0.2,
                    fluctuation_rate: 0.02,
                    use_adaptive: true,
                    probabilistic_intent: true,
                    ..Default::default()
                },
                RunConfig {
                    name: "energy_conservation".to_string(),
                    max_particles: 80,
                    energy_conservation: true,
                    ..Default::default()
                },
                RunConfig {
                    name: "full_features".to_string(),
                    max_particles: 120,
                    learning_rate: 0.15,
                    fluctuation_rate: 0.02,
                    use_adaptive: true,
                    energy_conservation: true,
                    probabilistic_intent: true,
                    ..Default::default()
                },
            ],
        }
    }
}

impl AppConfig {
    /// Validates batch-level settings. Individual runs are validated by the runner.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.output.data_dir.trim().is_empty(),
            "Output data directory must not be empty"
        );
        anyhow::ensure!(!self.runs.is_empty(), "At least one run must be configured");
        let mut seen = HashSet::new();
        for run in &self.runs {
            anyhow::ensure!(
                seen.insert(run.name.as_str()),
                "Duplicate run name: {}",
                run.name
            );
        }
        Ok(())
    }

    /// Parses and validates a batch configuration.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to the reference runs when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)
                .with_context(|| format!("invalid configuration in {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No configuration file, using default runs");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
}
