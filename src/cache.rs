use crate::config::CACHE_VERSION;
use crate::error::Result;
use crate::models::ExchangeRateSnapshot;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::SystemTime;

/// On-disk record. Versioned so a layout change reads as a miss instead of
/// garbage.
#[derive(Serialize, Deserialize)]
struct CacheRecord {
    version: u32,
    base: String,
    rates: HashMap<String, f64>,
    timestamp: SystemTime,
}

/// Single-slot durable cache for the most recent snapshot. The slot is not
/// keyed by base currency; callers check the stored base before trusting it.
pub struct RateCache {
    path: PathBuf,
}

impl RateCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the cached snapshot. A missing file, unparsable JSON, or a
    /// record from another version all count as a miss.
    pub fn load(&self) -> Option<ExchangeRateSnapshot> {
        let file = File::open(&self.path).ok()?;
        let reader = BufReader::new(file);
        let record: CacheRecord = match serde_json::from_reader(reader) {
            Ok(record) => record,
            Err(e) => {
                warn!("discarding unreadable rate cache: {}", e);
                return None;
            }
        };
        if record.version != CACHE_VERSION {
            warn!(
                "discarding rate cache with version {} (expected {})",
                record.version, CACHE_VERSION
            );
            return None;
        }
        Some(ExchangeRateSnapshot {
            base: record.base,
            rates: record.rates,
            fetched_at: record.timestamp,
        })
    }

    /// Replaces the slot wholesale, whatever base the previous entry had.
    pub fn store(&self, snapshot: &ExchangeRateSnapshot) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        let record = CacheRecord {
            version: CACHE_VERSION,
            base: snapshot.base.clone(),
            rates: snapshot.rates.clone(),
            timestamp: snapshot.fetched_at,
        };
        serde_json::to_writer(writer, &record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn snapshot(base: &str) -> ExchangeRateSnapshot {
        let rates = [("EUR".to_string(), 0.9), ("GBP".to_string(), 0.8)]
            .into_iter()
            .collect();
        ExchangeRateSnapshot::new(base, rates)
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("rates.json"));

        let snap = snapshot("USD");
        cache.store(&snap).unwrap();

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.base, "USD");
        assert_eq!(loaded.rates, snap.rates);
        assert_eq!(loaded.fetched_at, snap.fetched_at);
    }

    #[test]
    fn missing_file_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("rates.json"));
        assert!(cache.load().is_none());
    }

    #[test]
    fn corrupt_json_is_a_miss() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(RateCache::new(path).load().is_none());
    }

    #[test]
    fn version_mismatch_is_a_miss() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        std::fs::write(
            &path,
            r#"{"version":99,"base":"USD","rates":{},"timestamp":{"secs_since_epoch":0,"nanos_since_epoch":0}}"#,
        )
        .unwrap();
        assert!(RateCache::new(path).load().is_none());
    }

    #[test]
    fn store_overwrites_previous_base() {
        let dir = tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("rates.json"));

        cache.store(&snapshot("USD")).unwrap();
        cache.store(&snapshot("EUR")).unwrap();

        assert_eq!(cache.load().unwrap().base, "EUR");
    }

    #[test]
    fn store_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("nested/dir/rates.json"));
        cache.store(&snapshot("USD")).unwrap();
        assert!(cache.load().is_some());
    }
}
