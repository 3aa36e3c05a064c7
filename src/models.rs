use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;

use crate::config::CACHE_DURATION;

/// Wire shape of the rate API response. A body without a `rates` object is
/// malformed.
#[derive(Serialize, Deserialize, Debug)]
pub struct RatesResponse {
    #[serde(default)]
    pub base: Option<String>,
    pub rates: HashMap<String, f64>,
}

/// One immutable fetched rate table. `rates[code]` is the amount of `code`
/// equal to 1 unit of `base`; the base's own self-rate is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateSnapshot {
    pub base: String,
    pub rates: HashMap<String, f64>,
    pub fetched_at: SystemTime,
}

impl ExchangeRateSnapshot {
    pub fn new(base: &str, mut rates: HashMap<String, f64>) -> Self {
        rates.remove(base);
        Self {
            base: base.to_string(),
            rates,
            fetched_at: SystemTime::now(),
        }
    }

    /// Snapshot with no rates, returned when a fetch fails and nothing
    /// cached is usable. Conversions against it degrade to identity.
    pub fn empty(base: &str) -> Self {
        Self {
            base: base.to_string(),
            rates: HashMap::new(),
            fetched_at: SystemTime::UNIX_EPOCH,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Fresh snapshots are served without a network call. A stale one is
    /// still usable; it only makes the fetcher try the network first.
    pub fn is_fresh(&self) -> bool {
        match self.fetched_at.elapsed() {
            Ok(age) => age < CACHE_DURATION,
            // Clock went backwards; keep serving rather than refetch-looping.
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn rates(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(c, r)| (c.to_string(), *r)).collect()
    }

    #[test]
    fn new_strips_base_self_rate() {
        let snap = ExchangeRateSnapshot::new("USD", rates(&[("USD", 1.0), ("EUR", 0.9)]));
        assert!(!snap.rates.contains_key("USD"));
        assert_eq!(snap.rates.get("EUR"), Some(&0.9));
    }

    #[test]
    fn fresh_within_window() {
        let snap = ExchangeRateSnapshot::new("USD", rates(&[("EUR", 0.9)]));
        assert!(snap.is_fresh());
    }

    #[test]
    fn stale_after_window() {
        let mut snap = ExchangeRateSnapshot::new("USD", rates(&[("EUR", 0.9)]));
        snap.fetched_at = SystemTime::now() - Duration::from_secs(2 * 3600);
        assert!(!snap.is_fresh());
    }

    #[test]
    fn empty_snapshot_is_stale() {
        let snap = ExchangeRateSnapshot::empty("USD");
        assert!(snap.is_empty());
        assert!(!snap.is_fresh());
    }

    #[test]
    fn response_without_rates_fails_to_parse() {
        let res = serde_json::from_str::<RatesResponse>(r#"{"base":"USD"}"#);
        assert!(res.is_err());
    }
}
