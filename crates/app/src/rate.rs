//! Exchange rate provider.
//!
//! The rate is fetched once per run, in the background, and written into the
//! ledger's shared [`Rate`]. Failures are logged and never reach the user: the
//! ledger simply keeps the rate it already had.

use std::time::Duration;

use engine::Rate;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Official USD rate of the National Bank of the Republic of Belarus.
pub const DEFAULT_RATE_URL: &str = "https://api.nbrb.by/exrates/rates/USD?parammode=2";

#[derive(Debug, Error)]
pub enum RateError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid rate: {0}")]
    InvalidRate(String),
}

#[derive(Debug, Deserialize)]
struct OfficialRate {
    #[serde(rename = "Cur_OfficialRate")]
    official_rate: Option<f64>,
    /// Number of REF units the official rate is quoted for.
    #[serde(rename = "Cur_Scale", default = "default_scale")]
    scale: u32,
}

fn default_scale() -> u32 {
    1
}

impl OfficialRate {
    fn rate(&self) -> Result<f64, RateError> {
        let official = self
            .official_rate
            .ok_or_else(|| RateError::InvalidRate("missing Cur_OfficialRate".to_string()))?;
        if self.scale == 0 {
            return Err(RateError::InvalidRate("Cur_Scale is 0".to_string()));
        }

        let rate = official / f64::from(self.scale);
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RateError::InvalidRate(format!("{rate}")));
        }
        Ok(rate)
    }
}

#[derive(Debug, Clone)]
pub struct RateProvider {
    url: Url,
    http: reqwest::Client,
}

impl RateProvider {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, RateError> {
        let url = Url::parse(url).map_err(|err| RateError::InvalidUrl(format!("{url}: {err}")))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, http })
    }

    /// Fetches the current REF→LOCAL multiplier.
    pub async fn fetch_rate(&self) -> Result<f64, RateError> {
        let body = self
            .http
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<OfficialRate>()
            .await?;
        body.rate()
    }
}

/// Fetches the rate once in the background and stores it into `rate`.
pub fn spawn_refresh(provider: RateProvider, rate: Rate) -> JoinHandle<()> {
    tokio::spawn(async move {
        match provider.fetch_rate().await {
            Ok(value) => match rate.set(value) {
                Ok(()) => tracing::info!(rate = value, "exchange rate updated"),
                Err(err) => tracing::warn!("exchange rate ignored: {err}"),
            },
            Err(err) => {
                tracing::warn!(
                    "failed to fetch exchange rate, keeping {}: {err}",
                    rate.get()
                );
            }
        }
    })
}

/// Builds a provider for `url` and spawns a refresh. A provider that cannot
/// be built is logged and the rate is left alone.
pub fn start_refresh(url: &str, timeout: Duration, rate: Rate) -> Option<JoinHandle<()>> {
    match RateProvider::new(url, timeout) {
        Ok(provider) => Some(spawn_refresh(provider, rate)),
        Err(err) => {
            tracing::warn!("exchange rate not refreshed, keeping {}: {err}", rate.get());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> OfficialRate {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn official_rate_response() {
        let body = parse(
            r#"{"Cur_ID":431,"Date":"2026-10-16T00:00:00","Cur_Abbreviation":"USD",
                "Cur_Scale":1,"Cur_Name":"Доллар США","Cur_OfficialRate":3.2741}"#,
        );

        assert_eq!(body.rate().unwrap(), 3.2741);
    }

    #[test]
    fn scaled_rate() {
        let body = parse(r#"{"Cur_Scale":100,"Cur_OfficialRate":327.41}"#);

        assert!((body.rate().unwrap() - 3.2741).abs() < 1e-12);
    }

    #[test]
    fn scale_defaults_to_one() {
        assert_eq!(parse(r#"{"Cur_OfficialRate":2.5}"#).rate().unwrap(), 2.5);
    }

    #[test]
    fn unusable_responses() {
        assert!(parse(r#"{"Cur_Scale":1}"#).rate().is_err());
        assert!(parse(r#"{"Cur_OfficialRate":0}"#).rate().is_err());
        assert!(parse(r#"{"Cur_OfficialRate":-1.5}"#).rate().is_err());
        assert!(parse(r#"{"Cur_OfficialRate":3.0,"Cur_Scale":0}"#).rate().is_err());
    }

    #[test]
    fn invalid_url() {
        let err = RateProvider::new("not a url", Duration::from_secs(1)).unwrap_err();

        assert!(matches!(err, RateError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn bad_provider_url_keeps_the_rate() {
        let rate = Rate::new(3.0).unwrap();

        let handle = start_refresh("not a url", Duration::from_secs(1), rate.clone());

        assert!(handle.is_none());
        assert_eq!(rate.get(), 3.0);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_the_rate() {
        // Nothing listens on port 9 (discard) in the test environment.
        let provider =
            RateProvider::new("http://127.0.0.1:9/rate", Duration::from_millis(200)).unwrap();
        let rate = Rate::new(3.0).unwrap();

        spawn_refresh(provider, rate.clone()).await.unwrap();

        assert_eq!(rate.get(), 3.0);
    }
}
