//! Run configuration.
//!
//! A run is described by a `RunConfig`, which can come from a JSON file,
//! from command-line flags, or both (flags win). `RunConfig::validate`
//! turns it into a `RunPlan` once every required setting is present.

use crate::{
    engine::DateWindow,
    error::{ReconError, ReconResult},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Internal ledger CSV.
    pub system:      Option<PathBuf>,
    /// Bank statement CSVs, parsed in this order.
    pub banks:       Vec<PathBuf>,
    pub start:       Option<NaiveDate>,
    pub end:         Option<NaiveDate>,
    pub output_json: Option<PathBuf>,
}

/// A fully specified run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub system:      PathBuf,
    pub banks:       Vec<PathBuf>,
    pub window:      DateWindow,
    pub output_json: Option<PathBuf>,
}

impl RunConfig {
    /// Load a run config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ReconResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ReconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ReconError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer `overrides` on top of `self`; any setting present in
    /// `overrides` replaces the one here.
    pub fn merge(self, overrides: RunConfig) -> RunConfig {
        RunConfig {
            system:      overrides.system.or(self.system),
            banks:       if overrides.banks.is_empty() { self.banks } else { overrides.banks },
            start:       overrides.start.or(self.start),
            end:         overrides.end.or(self.end),
            output_json: overrides.output_json.or(self.output_json),
        }
    }

    pub fn validate(self) -> ReconResult<RunPlan> {
        let system = self.system.ok_or(ReconError::MissingSetting("system"))?;
        if self.banks.is_empty() {
            return Err(ReconError::MissingSetting("bank"));
        }
        let start = self.start.ok_or(ReconError::MissingSetting("start"))?;
        let end = self.end.ok_or(ReconError::MissingSetting("end"))?;

        let window = DateWindow::new(start, end);
        if window.is_inverted() {
            log::warn!("start {start} is after end {end}; nothing can fall inside the window");
        }

        Ok(RunPlan {
            system,
            banks: self.banks,
            window,
            output_json: self.output_json,
        })
    }
}

/// Split a comma-separated path list, skipping blank entries.
pub fn split_path_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}
