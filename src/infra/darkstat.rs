//! Thin asynchronous client for the Darkstat station API.
//!
//! One endpoint matters here: `POST api/npc_bases`, which returns every
//! station together with its commodity market listings. The payload is kept
//! as raw JSON values; per-record validation belongs to the domain layer,
//! which tolerates dirty entries instead of failing the whole fetch.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://darkstat.dd84ai.com/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("trade-route-scanner/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum DarkstatError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Request body for the station listing endpoint.
#[derive(Debug, Serialize)]
struct StationQuery<'a> {
    filter_market_good_category: &'a [&'a str],
    filter_to_useful: bool,
    include_market_goods: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_nicknames: Option<&'a [String]>,
}

#[derive(Clone)]
pub struct DarkstatClient {
    http: Client,
    base_url: Url,
}

impl DarkstatClient {
    pub fn new(base: &str) -> Result<Self, DarkstatError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Fetch all stations carrying commodity listings, optionally
    /// restricted to the given station nicknames.
    ///
    /// Fails on transport errors, non-success status codes and non-array
    /// payloads; there is no retry. An empty array is a valid response at
    /// this level, the API layer decides what to make of it.
    pub async fn fetch_stations(
        &self,
        nicknames: Option<&[String]>,
    ) -> Result<Vec<Value>, DarkstatError> {
        let url = self.base_url.join("api/npc_bases")?;
        let query = StationQuery {
            filter_market_good_category: &["commodity"],
            filter_to_useful: true,
            include_market_goods: true,
            filter_nicknames: nicknames,
        };

        debug!(%url, "requesting station market data");
        let response = self
            .http
            .post(url)
            .json(&query)
            .send()
            .await?
            .error_for_status()?;
        let payload: Value = response.json().await?;

        match payload {
            Value::Array(stations) => {
                debug!(count = stations.len(), "received station records");
                Ok(stations)
            }
            other => Err(DarkstatError::Payload(format!(
                "expected a station array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
