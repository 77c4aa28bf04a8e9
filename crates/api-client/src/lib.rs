// In crates/api-client/src/lib.rs

use app_config::UpstreamSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Candle, Period};
use reqwest::Url;
use std::time::Duration;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

/// A source of historical candles, oldest first.
///
/// The HTTP layer depends on this rather than on `ApiClient` so it can be
/// exercised without network access.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetches enough `period` candles for `exchange`/`pair` to cover
    /// `sample_size` intervals ending now.
    async fn fetch_candles(
        &self,
        exchange: &str,
        pair: &str,
        period: Period,
        sample_size: usize,
    ) -> Result<Vec<Candle>>;
}

impl ApiClient {
    /// Constructs a new ApiClient from UpstreamSettings.
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(ApiClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches historical candles for a pair on an exchange.
    ///
    /// This corresponds to the `GET /v1/{exchange}/candles` endpoint. The
    /// requested range spans `sample_size` periods back from now.
    pub async fn get_candles(
        &self,
        exchange: &str,
        pair: &str,
        period: Period,
        sample_size: usize,
    ) -> Result<Vec<Candle>> {
        let range = candle_range(Utc::now(), period, sample_size)?;
        let request = self.candles_request(exchange, pair, range, period)?;

        tracing::debug!(url = %request.url(), "Requesting candles from upstream.");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::RequestFailed)?;

        if !status.is_success() {
            return Err(Error::UpstreamStatus { status: status.as_u16(), body });
        }

        let candles: Vec<Candle> =
            serde_json::from_str(&body).map_err(Error::DeserializationFailed)?;

        tracing::debug!(count = candles.len(), exchange, pair, %period, "Received candles.");

        Ok(candles)
    }

    /// Builds the `GET` request for a candle range. The pair and range travel
    /// as encoded query parameters.
    pub fn candles_request(
        &self,
        exchange: &str,
        pair: &str,
        range: CandleRange,
        period: Period,
    ) -> Result<reqwest::Request> {
        let url = candles_url(&self.base_url, exchange)?;
        let start = range.start.to_string();
        let end = range.end.to_string();

        self.http_client
            .get(url)
            .query(&[
                ("pair", pair),
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("period", period.as_str()),
            ])
            .build()
            .map_err(Error::RequestFailed)
    }
}

#[async_trait]
impl CandleSource for ApiClient {
    async fn fetch_candles(
        &self,
        exchange: &str,
        pair: &str,
        period: Period,
        sample_size: usize,
    ) -> Result<Vec<Candle>> {
        self.get_candles(exchange, pair, period, sample_size).await
    }
}

/// The range covering `sample_size` periods that end at `end`.
pub fn candle_range(end: DateTime<Utc>, period: Period, sample_size: usize) -> Result<CandleRange> {
    let overflow = || Error::RangeOverflow { period, sample_size };

    let periods = i64::try_from(sample_size).map_err(|_| overflow())?;
    let span = i64::try_from(period.duration().as_secs())
        .ok()
        .and_then(|secs| secs.checked_mul(periods))
        .ok_or_else(overflow)?;

    let end = end.timestamp();
    let start = end.checked_sub(span).ok_or_else(overflow)?;
    Ok(CandleRange { start, end })
}

/// Builds the candle endpoint URL, `{base}/v1/{exchange}/candles`.
///
/// `exchange` is pushed as a single path segment, so any `/` in it is escaped.
pub fn candles_url(base_url: &str, exchange: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(format!("{base_url} cannot be a base URL")))?
        .pop_if_empty()
        .push("v1")
        .push(exchange)
        .push("candles");
    Ok(url)
}

// Free function to allow api_client::new usage
pub fn new(settings: &UpstreamSettings) -> Result<ApiClient> {
    ApiClient::new(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::Query, http::StatusCode, routing::get};
    use chrono::TimeZone;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    const CANDLES: &str = r#"[
        {"Open":35426.88,"High":35620.52,"Low":35180.72,"Close":35403.19,"BaseVolume":24.36630896,"QuoteVolume":0.0011324399691342,"OpenTime":"2021-05-18T21:00:00Z"},
        {"Open":35403.19,"High":35416.69,"Low":35021.21,"Close":35192.79,"BaseVolume":25.718721819999995,"QuoteVolume":0.0010189815988635,"OpenTime":"2021-05-18T21:30:00Z"},
        {"Open":35192.79,"High":35338.29,"Low":34976.53,"Close":35306.78,"BaseVolume":36.347537069999994,"QuoteVolume":0.0010619061358844999,"OpenTime":"2021-05-18T22:00:00Z"}
    ]"#;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: String) -> ApiClient {
        ApiClient::new(&UpstreamSettings { base_url, timeout_secs: 5 }).unwrap()
    }

    #[test]
    fn builds_candle_request() {
        let end = Utc.with_ymd_and_hms(2021, 5, 19, 12, 0, 0).unwrap();
        let range = candle_range(end, Period::ThirtyMinutes, 55).unwrap();

        assert_eq!(range.end - range.start, 55 * 30 * 60);

        let client = client_for("http://ticker".into());
        let request = client
            .candles_request("coinbasepro", "BTC-EUR", range, Period::ThirtyMinutes)
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            format!(
                "http://ticker/v1/coinbasepro/candles?pair=BTC-EUR&start={}&end={}&period=30m",
                range.start, range.end
            )
        );
    }

    #[test]
    fn exchange_and_pair_are_escaped() {
        let range = CandleRange { start: 0, end: 60 };
        let client = client_for("http://ticker".into());
        let request = client
            .candles_request("coin/base", "BTC&period=1m", range, Period::OneMinute)
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://ticker/v1/coin%2Fbase/candles?pair=BTC%26period%3D1m&start=0&end=60&period=1m"
        );
        assert_eq!(request.url().query_pairs().filter(|(k, _)| k == "period").count(), 1);
    }

    #[test]
    fn base_url_path_is_kept() {
        let url = candles_url("http://ticker/api/", "kraken").unwrap();
        assert_eq!(url.as_str(), "http://ticker/api/v1/kraken/candles");
        assert!(matches!(candles_url("not a url", "kraken"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn oversized_range_is_an_error() {
        let end = Utc.with_ymd_and_hms(2021, 5, 19, 12, 0, 0).unwrap();
        let err = candle_range(end, Period::OneDay, usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            Error::RangeOverflow { period: Period::OneDay, sample_size: usize::MAX }
        ));

        // Fits in i64 but the product does not.
        let err = candle_range(end, Period::OneDay, i64::MAX as usize / 2).unwrap_err();
        assert!(matches!(err, Error::RangeOverflow { .. }));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = client_for("http://ticker/".into());
        assert_eq!(client.base_url, "http://ticker");
    }

    #[tokio::test]
    async fn fetches_and_decodes_candles() {
        let router = Router::new().route(
            "/v1/coinbasepro/candles",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let start: i64 = q["start"].parse().unwrap();
                let end: i64 = q["end"].parse().unwrap();
                if q["pair"] != "BTC-EUR" || q["period"] != "30m" || end - start != 55 * 1800 {
                    return (StatusCode::BAD_REQUEST, "bad query".to_string());
                }
                (StatusCode::OK, CANDLES.to_string())
            }),
        );
        let client = client_for(serve(router).await);

        let candles = client
            .get_candles("coinbasepro", "BTC-EUR", Period::ThirtyMinutes, 55)
            .await
            .unwrap();

        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].close, 35403.19);
        assert_eq!(candles[2].close, 35306.78);
    }

    #[tokio::test]
    async fn pair_cannot_inject_query_parameters() {
        let router = Router::new().route(
            "/v1/coinbasepro/candles",
            get(|Query(q): Query<Vec<(String, String)>>| async move {
                let pairs: Vec<_> = q.iter().filter(|(k, _)| k == "pair").collect();
                let periods: Vec<_> = q.iter().filter(|(k, _)| k == "period").collect();
                if pairs.len() != 1 || pairs[0].1 != "BTC&period=1m" {
                    return (StatusCode::BAD_REQUEST, "bad pair".to_string());
                }
                if periods.len() != 1 || periods[0].1 != "30m" {
                    return (StatusCode::BAD_REQUEST, "bad period".to_string());
                }
                (StatusCode::OK, CANDLES.to_string())
            }),
        );
        let client = client_for(serve(router).await);

        let candles = client
            .get_candles("coinbasepro", "BTC&period=1m", Period::ThirtyMinutes, 55)
            .await
            .unwrap();

        assert_eq!(candles.len(), 3);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let router = Router::new().route(
            "/v1/nowhere/candles",
            get(|| async { (StatusCode::NOT_FOUND, "unknown exchange") }),
        );
        let client = client_for(serve(router).await);

        let err = client
            .fetch_candles("nowhere", "BTC-EUR", Period::OneHour, 55)
            .await
            .unwrap_err();

        match err {
            Error::UpstreamStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "unknown exchange");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let router = Router::new().route(
            "/v1/coinbasepro/candles",
            get(|| async { r#"{"error":"nope"}"# }),
        );
        let client = client_for(serve(router).await);

        let err = client
            .get_candles("coinbasepro", "BTC-EUR", Period::OneDay, 55)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DeserializationFailed(_)));
    }
}
