use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::weather::{AirportWeather, SpecialReport, WeatherResult};

/// Last-known-good result set kept on disk so the display can fall back
/// when the backend is unreachable. The pipeline never reads this; only
/// the caller does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSnapshot {
    pub saved_at: DateTime<Utc>,
    pub last_updated: String,
    pub data: Vec<AirportWeather>,
    pub special_reports: Vec<SpecialReport>,
}

impl CachedSnapshot {
    pub fn from_result(result: &WeatherResult) -> Self {
        Self {
            saved_at: Utc::now(),
            last_updated: result.last_updated.clone(),
            data: result.data.clone(),
            special_reports: result.special_reports.clone(),
        }
    }

    /// Load from file, None if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)
            .context("Failed to read weather cache")?;
        let snapshot: CachedSnapshot =
            serde_json::from_str(&raw).context("Failed to parse weather cache")?;
        Ok(Some(snapshot))
    }

    /// Save state to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)
            .context("Failed to serialize weather cache")?;
        std::fs::write(path, raw).context("Failed to write weather cache")?;
        Ok(())
    }

    pub fn is_stale(&self, ttl_secs: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.saved_at);
        age.num_seconds() < 0 || age.num_seconds() as u64 >= ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn empty_snapshot() -> CachedSnapshot {
        CachedSnapshot {
            saved_at: Utc::now(),
            last_updated: "26.2.5. 16:48".to_string(),
            data: Vec::new(),
            special_reports: Vec::new(),
        }
    }

    #[test]
    fn test_staleness_boundary() {
        let mut snapshot = empty_snapshot();
        assert!(!snapshot.is_stale(600));

        snapshot.saved_at = Utc::now() - Duration::seconds(601);
        assert!(snapshot.is_stale(600));
    }

    #[test]
    fn test_round_trip() {
        let snapshot = empty_snapshot();
        let raw = serde_json::to_string(&snapshot).unwrap();
        let back: CachedSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.last_updated, snapshot.last_updated);
        assert_eq!(back.saved_at, snapshot.saved_at);
    }
}
