//! # Intentsim Core
//!
//! The simulation engine: a population of particles embedded in a
//! fluctuating 3-D intent field, whose pairwise interactions form composites
//! and clusters.
//!
//! This crate contains:
//! - Field generation and mutation (`field`)
//! - Particle creation and id allocation (`lifecycle`)
//! - The pairwise interaction resolver (`interaction`)
//! - Per-step systems: population management, statistics, anomaly detection
//! - Run configuration and per-run metrics
//!
//! All randomness is drawn from a caller-supplied `Rng`; a seeded stream
//! reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use intentsim_core::config::IdScheme;
//! use intentsim_core::field::IntentField;
//! use intentsim_core::lifecycle::{create_particle, IdAllocator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let field = IntentField::generate(10, 0.01, false, &mut rng);
//! let mut ids = IdAllocator::new(IdScheme::Monotonic);
//! let particle = create_particle(field.sample(&mut rng), ids.particle_id(0), false, &mut rng);
//! assert_eq!(particle.id, 0);
//! ```

/// Run and batch configuration
pub mod config;
/// The 3-D intent field
pub mod field;
/// Pairwise interaction resolver
pub mod interaction;
/// Particle creation and id allocation
pub mod lifecycle;
/// Per-run counters and logging bootstrap
pub mod metrics;
/// Population, statistics and anomaly systems
pub mod systems;

pub use config::{AppConfig, CompositeMode, EngineConfig, IdScheme, RunConfig};
pub use field::IntentField;
pub use metrics::{init_logging, RunMetrics};
