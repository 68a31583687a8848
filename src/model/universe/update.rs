use crate::model::universe::Universe;
use intentsim_core::field::IntentField;
use intentsim_core::metrics;
use intentsim_core::systems::population::{self, StepReport};
use std::time::Instant;

impl Universe {
    /// Advances the run by one step.
    ///
    /// Order within a step:
    /// 1. spawn one particle if the population is below its cap
    /// 2. on refresh steps, regenerate the field, then on feedback steps let
    ///    composite and adaptive particles nudge it
    /// 3. decay, aging and the pairwise pass, then culling
    /// 4. on sampling steps, record a snapshot and check for anomalies
    pub fn update(&mut self) -> StepReport {
        let start = Instant::now();
        let iteration = self.tick;
        self.tick += 1;

        population::spawn(
            &mut self.particles,
            &self.field,
            &self.config,
            &mut self.ids,
            &mut self.rng,
        );

        let engine = &self.config.engine;
        if iteration % engine.field_refresh_interval == 0 {
            self.field = IntentField::generate(
                engine.field_size,
                self.config.fluctuation_rate,
                self.config.probabilistic_intent,
                &mut self.rng,
            );
            if iteration % engine.feedback_interval == 0 && !self.particles.is_empty() {
                let nudged =
                    population::apply_feedback(&self.particles, &mut self.field, &mut self.rng);
                tracing::debug!(run = %self.config.name, step = self.tick, nudged, "Field feedback");
            }
        }

        let report = population::interact_and_cull(
            &mut self.particles,
            &self.config,
            &mut self.ids,
            &mut self.rng,
        );
        self.total_interactions += report.interactions;

        self.metrics.add(metrics::INTERACTIONS, report.interactions);
        self.metrics.add(metrics::COMPOSITES_FORMED, report.composites_formed);
        self.metrics.add(metrics::CLUSTERS_ASSIGNED, report.clusters_assigned);
        self.metrics.add(metrics::PARTICLES_REMOVED, report.removed as u64);

        self.finalize_step(iteration);
        self.metrics.record_step(start.elapsed(), self.particles.len());
        report
    }
}
