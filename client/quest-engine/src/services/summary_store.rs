use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::run::RunSummary;

/// Key the summary lives under inside the store file, so a reopened
/// results screen can recover the last run without navigation parameters.
pub const SUMMARY_KEY: &str = "last_run_summary";

const STORE_FILE: &str = "quest_summary.json";

/// Local key-value persistence for the final run summary.
pub struct SummaryStore {
    path: PathBuf,
}

impl SummaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data dir when no explicit path is
    /// configured.
    pub fn at_default_location() -> Option<Self> {
        ProjectDirs::from("pe", "Aula360", "aula360-quest")
            .map(|dirs| Self::new(dirs.data_dir().join(STORE_FILE)))
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, summary: &RunSummary) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let document = serde_json::json!({ SUMMARY_KEY: summary });
        let body = serde_json::to_vec_pretty(&document).context("failed to serialize summary")?;

        // Write-then-rename so a crash never leaves a half-written store.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to move summary into {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), "run summary persisted");
        Ok(())
    }

    /// `Ok(None)` when no summary has been stored yet.
    pub fn load(&self) -> Result<Option<RunSummary>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let body = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let document: serde_json::Value =
            serde_json::from_slice(&body).context("summary store is not valid JSON")?;

        match document.get(SUMMARY_KEY) {
            Some(value) => {
                let summary = serde_json::from_value(value.clone())
                    .context("stored summary has an unexpected shape")?;
                Ok(Some(summary))
            }
            None => Ok(None),
        }
    }
}
