use crate::analysis::counter_stats::StatsMap;
use crate::error::AppError;
use crate::pipeline::RunReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Write-once snapshot of a run's output, for downstream renderers.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub region: String,
    pub generated_at: DateTime<Utc>,
    pub catalogue_version: String,
    pub players_discovered: usize,
    pub matches_processed: usize,
    pub champions: StatsMap,
}

impl StatsSnapshot {
    pub fn from_report(region: &str, report: &RunReport) -> Self {
        StatsSnapshot {
            region: region.to_string(),
            generated_at: Utc::now(),
            catalogue_version: report.catalogue.version.clone(),
            players_discovered: report.players_discovered,
            matches_processed: report.matches_processed,
            champions: report.stats.clone(),
        }
    }

    pub fn default_path(region: &str) -> PathBuf {
        let cache_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".counter_stats");

        cache_dir.join(format!("{}.json", region))
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::CacheError(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize snapshot: {}", e)))?;

        fs::write(path, json).map_err(|e| {
            AppError::CacheError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}
