use crate::model::universe::Universe;
use intentsim_core::config::RunConfig;
use intentsim_core::field::IntentField;
use intentsim_core::lifecycle::IdAllocator;
use intentsim_core::metrics::RunMetrics;
use intentsim_core::systems::population;
use intentsim_data::SystemState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

impl Universe {
    /// Validates `config` and builds the initial field and population.
    ///
    /// An invalid configuration is rejected here, before any step runs.
    pub fn new(config: RunConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let mut rng = if let Some(seed) = config.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };

        let field = IntentField::generate(
            config.engine.field_size,
            config.fluctuation_rate,
            config.probabilistic_intent,
            &mut rng,
        );
        let mut ids = IdAllocator::new(config.id_scheme);
        let particles = population::seed_population(&field, &config, &mut ids, &mut rng);

        tracing::info!(
            run = %config.name,
            fingerprint = %config.fingerprint(),
            seed = ?config.seed,
            particles = particles.len(),
            iterations = config.iterations,
            "Run started"
        );

        let metrics = RunMetrics::new(&config.name);
        Ok(Self {
            config,
            field,
            particles,
            tick: 0,
            total_interactions: 0,
            snapshots: Vec::new(),
            anomalies: Vec::new(),
            prev_state: SystemState::default(),
            ids,
            rng,
            metrics,
        })
    }
}
