//! Run documents and the run summary.
//!
//! Each run produces one `simulation_{name}_{timestamp}.json` document. The
//! directory-level `summary.json` lists every run name seen so far plus the
//! most recent batch timestamp; it is read, merged and rewritten after each
//! batch.

use crate::error::Result;
use crate::serialization::{read_json_file, write_json_file};
use intentsim_core::config::RunConfig;
use intentsim_data::{Anomaly, Snapshot};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "summary.json";
/// `chrono` format of batch timestamps, also used in document file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Local wall-clock timestamp for a new batch.
#[must_use]
pub fn batch_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDocument {
    pub config: RunConfig,
    pub data: Vec<Snapshot>,
    pub anomalies: Vec<Anomaly>,
    pub timestamp: String,
}

impl RunDocument {
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("simulation_{}_{}.json", self.config.name, self.timestamp)
    }
}

/// Writes `doc` under `dir`, creating the directory if needed. Returns the written path.
pub fn write_run_document(dir: &Path, doc: &RunDocument) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        crate::IoError::FileSystem(e).with_context(format!("creating output dir {:?}", dir))
    })?;
    let path = dir.join(doc.file_name());
    write_json_file(doc, &path)?;
    tracing::info!(path = %path.display(), snapshots = doc.data.len(), "Saved run document");
    Ok(path)
}

pub fn read_run_document(path: &Path) -> Result<RunDocument> {
    read_json_file(path)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub timestamp: String,
    pub simulations: Vec<String>,
    pub latest_run: String,
}

impl RunSummary {
    /// Adds `name` if absent and marks `timestamp` as the latest batch.
    pub fn record(&mut self, name: &str, timestamp: &str) {
        if !self.simulations.iter().any(|s| s == name) {
            self.simulations.push(name.to_string());
        }
        self.timestamp = timestamp.to_string();
        self.latest_run = timestamp.to_string();
    }

    /// Loads the summary in `dir`.
    ///
    /// A missing or unreadable summary is treated as empty; the latter is
    /// logged since it discards whatever the file held.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SUMMARY_FILE);
        match read_json_file(&path) {
            Ok(summary) => summary,
            Err(e) if e.is_not_found() => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable run summary");
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| {
            crate::IoError::FileSystem(e).with_context(format!("creating output dir {:?}", dir))
        })?;
        let path = dir.join(SUMMARY_FILE);
        write_json_file(self, &path)?;
        Ok(path)
    }
}

/// Read-modify-write of the summary in `dir` for a finished batch.
pub fn update_summary(dir: &Path, names: &[String], timestamp: &str) -> Result<RunSummary> {
    let mut summary = RunSummary::load(dir);
    for name in names {
        summary.record(name, timestamp);
    }
    if names.is_empty() {
        summary.timestamp = timestamp.to_string();
        summary.latest_run = timestamp.to_string();
    }
    summary.save(dir)?;
    Ok(summary)
}
