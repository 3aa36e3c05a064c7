pub mod api;
pub mod cache;
pub mod config;
pub mod context;
pub mod convert;
pub mod currencies;
pub mod error;
pub mod fetcher;
pub mod models;

pub use api::{HttpRateSource, RateSource};
pub use cache::RateCache;
pub use context::CurrencyContext;
pub use convert::convert;
pub use currencies::Currency;
pub use error::{Error, Result};
pub use fetcher::{RateFetcher, RatesResult};
pub use models::ExchangeRateSnapshot;
