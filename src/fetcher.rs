use crate::api::RateSource;
use crate::cache::RateCache;
use crate::error::Error;
use crate::models::ExchangeRateSnapshot;
use log::{debug, info, warn};
use std::sync::Arc;

/// Outcome of a rate fetch. Data and error travel together so callers can
/// tell fresh rates apart from stale-after-failure or empty-after-failure.
pub struct RatesResult {
    pub snapshot: ExchangeRateSnapshot,
    /// True when the snapshot came from the cache after a failed refresh.
    pub stale: bool,
    pub error: Option<Error>,
}

impl RatesResult {
    fn fresh(snapshot: ExchangeRateSnapshot) -> Self {
        Self {
            snapshot,
            stale: false,
            error: None,
        }
    }
}

/// Cache-first rate fetcher. Owns the durable cache slot; the source is a
/// trait object so tests can inject a fake.
pub struct RateFetcher {
    source: Arc<dyn RateSource>,
    cache: RateCache,
}

impl RateFetcher {
    pub fn new(source: Arc<dyn RateSource>, cache: RateCache) -> Self {
        Self { source, cache }
    }

    /// Returns rates relative to `base`. A fresh cached snapshot for the
    /// same base is served without touching the network; otherwise the
    /// source is queried and the cache slot replaced. On failure the cached
    /// entry for the same base is served stale, or an empty table when no
    /// usable entry exists.
    pub async fn fetch_rates(&self, base: &str) -> RatesResult {
        let cached = self.cache.load().filter(|snap| snap.base == base);

        if let Some(snap) = &cached {
            if snap.is_fresh() {
                debug!("serving fresh cached rates for {}", base);
                return RatesResult::fresh(snap.clone());
            }
        }

        match self.source.latest(base).await {
            Ok(response) => {
                let snapshot = ExchangeRateSnapshot::new(base, response.rates);
                info!(
                    "fetched {} rates for base {}",
                    snapshot.rates.len(),
                    snapshot.base
                );
                if let Err(e) = self.cache.store(&snapshot) {
                    warn!("failed to persist rate cache: {}", e);
                }
                RatesResult::fresh(snapshot)
            }
            Err(e) => match cached {
                Some(snapshot) => {
                    warn!("rate fetch for {} failed, serving stale cache: {}", base, e);
                    RatesResult {
                        snapshot,
                        stale: true,
                        error: Some(e),
                    }
                }
                None => {
                    warn!("rate fetch for {} failed with no usable cache: {}", base, e);
                    RatesResult {
                        snapshot: ExchangeRateSnapshot::empty(base),
                        stale: false,
                        error: Some(e),
                    }
                }
            },
        }
    }
}
