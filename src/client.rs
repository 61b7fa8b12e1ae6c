use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::config::load_config;
use crate::endpoint::{Endpoint, Filters};
use crate::error::{Error, Result, request_failed};
use crate::query::{Params, check_payload_start, with_credentials};
use crate::util::{redact, urljoin};

/// Versioned base URL of the public NPS API.
pub const DEFAULT_URL: &str = "https://developer.nps.gov/api/v1";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolved, immutable settings for a [`Client`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Base API URL, typically `https://developer.nps.gov/api/v1`.
    pub url: String,
    /// API key from the NPS developer portal.
    pub key: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether to verify TLS certificates.
    pub verify: bool,
}

impl ClientConfig {
    /// Defaults for everything but the key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            key: key.into(),
            timeout: DEFAULT_TIMEOUT,
            verify: true,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("key", &redact(&self.key))
            .field("timeout", &self.timeout)
            .field("verify", &self.verify)
            .finish()
    }
}

/// Blocking NPS API client; cheap to clone and reuse across calls.
#[derive(Clone)]
pub struct Client {
    url: String,
    key: String,
    timeout: Duration,

    http: HttpClient,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .field("key", &redact(&self.key))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client using environment variables and/or `.npsrc`.
    ///
    /// This is equivalent to `Client::new(None, None, None)`.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None, None)
    }

    /// Creates a client using (in order of precedence):
    /// - explicit `url`/`key`/`timeout` arguments
    /// - environment variables `NPS_API_URL` / `NPS_API_KEY` / `NPS_API_TIMEOUT`
    /// - config file from `NPS_RC` or `.npsrc`
    pub fn new(url: Option<String>, key: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let cfg = load_config(url, key, timeout)?;
        Self::with_config(cfg)
    }

    /// Creates a client for `key` against the public API with default settings.
    pub fn with_api_key(key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(key))
    }

    /// Creates a client from an already resolved configuration.
    pub fn with_config(cfg: ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("nps-client-rs/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("nps-client-rs")),
        );

        let mut builder = HttpClient::builder()
            .default_headers(default_headers)
            .timeout(cfg.timeout);

        if !cfg.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(Error::HttpClient)?;

        Ok(Self {
            url: cfg.url,
            key: cfg.key,
            timeout: cfg.timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns a copy of `payload` with `api_key` and `limit=100` merged in.
    ///
    /// Caller-supplied values under those two names are overwritten.
    pub fn build_query_parameters(&self, payload: &Params) -> Params {
        with_credentials(payload, &self.key)
    }

    /// Sends a GET to `base_url + path` and returns the parsed JSON body.
    ///
    /// A `start` entry in `params` must be a non-negative integer.
    pub fn fetch_endpoint(&self, path: &str, params: &Params) -> Result<Value> {
        check_payload_start(params)?;
        let query = self.build_query_parameters(params);
        self.get_json(path, &query)
    }

    /// Queries `endpoint` with `filters`; the typed operations below delegate here.
    pub fn endpoint(&self, endpoint: Endpoint, filters: &Filters) -> Result<Value> {
        let payload = filters.to_params(endpoint)?;
        self.fetch_endpoint(endpoint.path(), &payload)
    }

    /// Categories of activities (astronomy, hiking, wildlife watching, etc.).
    pub fn activities(&self, filters: &Filters) -> Result<Value> {
        self.endpoint(Endpoint::Activities, filters)
    }

    /// Park address, contacts, description, hours of operation, etc.
    pub fn parks(&self, filters: &Filters) -> Result<Value> {
        self.endpoint(Endpoint::Parks, filters)
    }

    pub fn visitor_centers(&self, filters: &Filters) -> Result<Value> {
        self.endpoint(Endpoint::VisitorCenters, filters)
    }

    pub fn campgrounds(&self, filters: &Filters) -> Result<Value> {
        self.endpoint(Endpoint::Campgrounds, filters)
    }

    /// Categories of topics (American revolution, music, women's history, etc.).
    pub fn topics(&self, filters: &Filters) -> Result<Value> {
        self.endpoint(Endpoint::Topics, filters)
    }

    /// Parks related to categories of topics.
    pub fn topics_parks(&self, filters: &Filters) -> Result<Value> {
        self.endpoint(Endpoint::TopicsParks, filters)
    }

    pub fn amenity_types(&self, filters: &Filters) -> Result<Value> {
        self.endpoint(Endpoint::AmenityTypes, filters)
    }

    /// "Places" within parks that have different amenities.
    pub fn amenity_places(&self, filters: &Filters) -> Result<Value> {
        self.endpoint(Endpoint::AmenityPlaces, filters)
    }

    fn get_json(&self, path: &str, query: &Params) -> Result<Value> {
        let url = urljoin(&self.url, path);
        let names: Vec<&str> = query
            .keys()
            .map(String::as_str)
            .filter(|k| *k != "api_key")
            .collect();
        tracing::debug!(endpoint = path, params = ?names, "GET");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .map_err(|source| transport(path, source))?;

        let status = resp.status();
        let text = resp.text().map_err(|source| transport(path, source))?;

        if status != StatusCode::OK {
            tracing::warn!(endpoint = path, status = status.as_u16(), "NPS API request failed");
            return Err(request_failed(status, path, &text));
        }

        tracing::debug!(endpoint = path, status = status.as_u16(), bytes = text.len(), "OK");
        serde_json::from_str::<Value>(&text).map_err(|source| Error::Decode {
            endpoint: path.to_string(),
            source,
        })
    }
}

fn transport(path: &str, source: reqwest::Error) -> Error {
    tracing::warn!(endpoint = path, error = %source, "could not reach NPS API");
    Error::Transport {
        endpoint: path.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ParamValue, params};

    #[test]
    fn query_parameters_always_carry_key_and_limit() {
        let client = Client::with_api_key("my-key").unwrap();

        for payload in [
            Params::new(),
            params([("parkCode", "acad")]),
            params([("api_key", ParamValue::from("other")), ("limit", 7i64.into())]),
        ] {
            let query = client.build_query_parameters(&payload);
            assert_eq!(query["api_key"], ParamValue::Str("my-key".into()));
            assert_eq!(query["limit"], ParamValue::Int(100));
        }
    }

    #[test]
    fn debug_output_hides_key() {
        let cfg = ClientConfig::new("secret-key-9876");
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("secret-key"));
        assert!(shown.contains("9876"));

        let client = Client::with_config(cfg).unwrap();
        assert!(!format!("{client:?}").contains("secret-key"));
        assert_eq!(client.base_url(), DEFAULT_URL);
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn rejects_non_numeric_start_before_sending() {
        // Unroutable base URL: reaching the network would surface as Transport.
        let client = Client::with_config(ClientConfig {
            url: "http://127.0.0.1:9".into(),
            ..ClientConfig::new("k")
        })
        .unwrap();

        let err = client
            .fetch_endpoint("/parks", &params([("start", "abc")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));

        let err = client.campgrounds(&Filters::new().start(-5)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
