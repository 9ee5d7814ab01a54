use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use common::{Candle, CandleProvider, Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the synthetic-index price endpoint.
///
/// Issues `GET {base}?index={symbol}&interval={interval}&count={count}` and
/// expects a `{"candles": [...]}` body.
pub struct DerivClient {
    base_url: Url,
    interval: String,
    http: Client,
}

impl DerivClient {
    pub fn new(base_url: &str, interval: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid DATA_API_URL '{base_url}': {e}")))?;
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url,
            interval: interval.into(),
            http,
        })
    }

    fn candles_url(&self, symbol: &str, count: usize) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("index", symbol)
            .append_pair("interval", &self.interval)
            .append_pair("count", &count.to_string());
        url
    }
}

#[async_trait]
impl CandleProvider for DerivClient {
    async fn fetch_candles(&self, symbol: &str, count: usize) -> Result<Vec<Candle>> {
        let url = self.candles_url(symbol, count);
        debug!(symbol = %symbol, count, "Fetching candles");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ProviderUnavailable(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::ProviderUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::ProviderUnavailable(format!("HTTP {status}: {body}")));
        }
        parse_candles(&body)
    }
}

/// Parse a price response body into candles, oldest first.
pub fn parse_candles(body: &str) -> Result<Vec<Candle>> {
    let resp: CandlesResponse = serde_json::from_str(body)?;
    if let Some(err) = resp.error {
        return Err(Error::ProviderUnavailable(err.message));
    }

    let mut candles = resp
        .candles
        .ok_or_else(|| Error::ProviderUnavailable("response has no 'candles' field".into()))?
        .into_iter()
        .map(CandleRecord::into_candle)
        .collect::<Result<Vec<_>>>()?;

    candles.sort_by_key(|c| c.timestamp);
    Ok(candles)
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CandlesResponse {
    #[serde(default)]
    candles: Option<Vec<CandleRecord>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Deserialize)]
struct CandleRecord {
    #[serde(alias = "timestamp")]
    epoch: i64,
    #[serde(default)]
    open: Option<Price>,
    high: Price,
    low: Price,
    close: Price,
}

/// Prices arrive either as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    fn value(self) -> Result<f64> {
        match self {
            Price::Number(v) => Ok(v),
            Price::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| Error::ProviderUnavailable(format!("invalid price '{s}'"))),
        }
    }
}

impl CandleRecord {
    fn into_candle(self) -> Result<Candle> {
        let timestamp = Utc
            .timestamp_opt(self.epoch, 0)
            .single()
            .ok_or_else(|| Error::ProviderUnavailable(format!("invalid epoch {}", self.epoch)))?;
        let close = self.close.value()?;
        let open = match self.open {
            Some(p) => p.value()?,
            None => close,
        };

        Ok(Candle {
            open,
            high: self.high.value()?,
            low: self.low.value()?,
            close,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_string_prices() {
        let body = r#"{"candles":[
            {"epoch":1700000300,"open":"101.5","high":"102.0","low":"100.9","close":"101.2"},
            {"epoch":1700000000,"open":100.0,"high":101.0,"low":99.5,"close":100.5}
        ]}"#;
        let candles = parse_candles(body).unwrap();
        assert_eq!(candles.len(), 2);
        // Sorted oldest first
        assert_eq!(candles[0].close, 100.5);
        assert_eq!(candles[1].close, 101.2);
        assert_eq!(candles[1].open, 101.5);
        assert_eq!(candles[0].timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn timestamp_alias_and_missing_open() {
        let body = r#"{"candles":[{"timestamp":1700000000,"high":2,"low":1,"close":1.5}]}"#;
        let candles = parse_candles(body).unwrap();
        assert_eq!(candles[0].open, 1.5);
    }

    #[test]
    fn empty_candle_list_is_ok() {
        assert!(parse_candles(r#"{"candles":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn api_error_is_provider_unavailable() {
        let err = parse_candles(r#"{"error":{"code":"InvalidSymbol","message":"Unknown index"}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::ProviderUnavailable(msg) if msg == "Unknown index"));
    }

    #[test]
    fn missing_candles_field_is_rejected() {
        assert!(matches!(
            parse_candles("{}").unwrap_err(),
            Error::ProviderUnavailable(_)
        ));
    }

    #[test]
    fn malformed_body_is_json_error() {
        assert!(matches!(parse_candles("not json").unwrap_err(), Error::Json(_)));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let body = r#"{"candles":[{"epoch":1700000000,"high":"x","low":1,"close":1}]}"#;
        assert!(parse_candles(body).is_err());
    }

    #[test]
    fn url_carries_query_parameters() {
        let client = DerivClient::new("https://api.deriv.com/api/exchange/v1/price", "5m").unwrap();
        let url = client.candles_url("R_10_1s", 100);
        assert_eq!(
            url.as_str(),
            "https://api.deriv.com/api/exchange/v1/price?index=R_10_1s&interval=5m&count=100"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        assert!(matches!(
            DerivClient::new("not a url", "5m"),
            Err(Error::Config(_))
        ));
    }
}
