//! Batch execution of configured runs.
//!
//! Runs share nothing, so they execute in parallel on the rayon pool. A run
//! whose configuration is invalid, or whose document cannot be written, is
//! reported in its `RunOutcome` without affecting the others.

use crate::model::config::{AppConfig, RunConfig};
use crate::model::persistence::{batch_timestamp, update_summary, write_run_document, RunDocument};
use crate::model::universe::Universe;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct RunOutcome {
    pub name: String,
    /// Where the run document was written, if the run completed and was saved.
    pub path: Option<PathBuf>,
    pub error: Option<String>,
}

impl RunOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs one configuration to completion and returns its document.
pub fn execute_run(config: &RunConfig, timestamp: &str) -> anyhow::Result<RunDocument> {
    let mut universe = Universe::new(config.clone())?;
    universe.run();
    Ok(universe.into_document(timestamp))
}

fn execute_and_persist(config: &RunConfig, data_dir: &Path, timestamp: &str) -> RunOutcome {
    let name = config.name.clone();
    let doc = match execute_run(config, timestamp) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!(run = %name, error = %e, "Run rejected");
            return RunOutcome {
                name,
                path: None,
                error: Some(e.to_string()),
            };
        }
    };

    match write_run_document(data_dir, &doc) {
        Ok(path) => RunOutcome {
            name,
            path: Some(path),
            error: None,
        },
        Err(e) => {
            tracing::error!(run = %name, error = %e, "Failed to save run document");
            RunOutcome {
                name,
                path: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Executes every run in `config`, writes one document per run under its
/// data directory and merges the completed run names into the summary.
///
/// Outcomes are returned in configuration order.
pub fn run_all(config: &AppConfig) -> anyhow::Result<Vec<RunOutcome>> {
    config.validate()?;
    let data_dir = Path::new(&config.output.data_dir);
    let timestamp = batch_timestamp();

    tracing::info!(runs = config.runs.len(), timestamp = %timestamp, "Starting batch");

    let outcomes: Vec<RunOutcome> = config
        .runs
        .par_iter()
        .map(|run| execute_and_persist(run, data_dir, &timestamp))
        .collect();

    let completed: Vec<String> = outcomes
        .iter()
        .filter(|o| o.succeeded())
        .map(|o| o.name.clone())
        .collect();

    if !completed.is_empty() {
        if let Err(e) = update_summary(data_dir, &completed, &timestamp) {
            tracing::error!(error = %e, "Failed to update run summary");
        }
    }

    Ok(outcomes)
}
