use crate::config;
use crate::error::{Error, Result};
use crate::models::RatesResponse;
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of exchange rate tables. The HTTP client implements it for the
/// real API; tests substitute an in-memory fake.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the latest rate table relative to `base`.
    async fn latest(&self, base: &str) -> Result<RatesResponse>;
}

pub struct HttpRateSource {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpRateSource {
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(config::api_url(), config::api_key())
    }

    fn url(&self, base: &str) -> String {
        let mut url = format!("{}/{}", self.base_url.trim_end_matches('/'), base);
        if let Some(key) = &self.api_key {
            url.push_str(&format!("?access_key={}", key));
        }
        url
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn latest(&self, base: &str) -> Result<RatesResponse> {
        let url = self.url(base);
        debug!("requesting rates for {} from {}", base, self.base_url);
        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body: serde_json::Value = response.json().await?;
                serde_json::from_value::<RatesResponse>(body)
                    .map_err(|e| Error::MalformedResponse(e.to_string()))
            }
            StatusCode::FORBIDDEN => Err(Error::RateLimited),
            status => Err(Error::Status(status)),
        }
    }
}
