use crate::convert;
use crate::currencies::{self, Currency};
use crate::fetcher::RateFetcher;
use crate::models::ExchangeRateSnapshot;
use log::warn;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// Holds the selected display currency and the current rate snapshot, and
/// exposes conversion, formatting, and fetch state to callers. The selection
/// is persisted as a plain code string and restored on construction.
pub struct CurrencyContext {
    fetcher: RateFetcher,
    selected: &'static Currency,
    snapshot: ExchangeRateSnapshot,
    prefs_path: PathBuf,
    loading: bool,
    error: Option<String>,
    last_updated: Option<SystemTime>,
}

impl CurrencyContext {
    /// Restores the persisted selection, falling back to the default when
    /// the file is absent or holds a code outside the enumerated set.
    pub fn new(fetcher: RateFetcher, prefs_path: PathBuf) -> Self {
        let selected = fs::read_to_string(&prefs_path)
            .ok()
            .and_then(|code| currencies::find(code.trim()))
            .unwrap_or_else(currencies::default_currency);

        Self {
            fetcher,
            selected,
            snapshot: ExchangeRateSnapshot::empty(selected.code),
            prefs_path,
            loading: false,
            error: None,
            last_updated: None,
        }
    }

    /// Fetches rates for the selected base and replaces the held snapshot.
    /// Ignored while a fetch is already in flight.
    pub async fn refresh(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;

        let result = self.fetcher.fetch_rates(self.selected.code).await;
        self.error = result.error.map(|e| e.to_string());
        if !result.snapshot.is_empty() {
            self.last_updated = Some(result.snapshot.fetched_at);
        }
        self.snapshot = result.snapshot;

        self.loading = false;
    }

    /// Switches the display currency and refetches rates for the new base.
    /// Unknown codes are ignored; the selection and its persisted value stay
    /// as they were.
    pub async fn set_currency(&mut self, code: &str) {
        let Some(currency) = currencies::find(code) else {
            warn!("ignoring unknown currency selection: {}", code);
            return;
        };
        if currency.code == self.selected.code {
            return;
        }

        self.selected = currency;
        if let Err(e) = self.persist_selection() {
            warn!("failed to persist currency selection: {}", e);
        }
        self.refresh().await;
    }

    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        convert::convert(amount, from, to, &self.snapshot)
    }

    /// Display formatting: selected currency symbol, two decimal places.
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.selected.symbol, amount)
    }

    pub fn currency(&self) -> &'static Currency {
        self.selected
    }

    pub fn fetcher(&self) -> &RateFetcher {
        &self.fetcher
    }

    pub fn snapshot(&self) -> &ExchangeRateSnapshot {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_updated(&self) -> Option<SystemTime> {
        self.last_updated
    }

    fn persist_selection(&self) -> std::io::Result<()> {
        if let Some(dir) = self.prefs_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.prefs_path, self.selected.code)
    }
}
