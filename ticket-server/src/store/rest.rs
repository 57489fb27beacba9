//! PostgREST-style HTTP record store.
//!
//! Each transport mode lives in its own table under `{base_url}/rest/v1/`.
//! All three stores share one HTTP client and one concurrency limit.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{DepartureSlot, ReferenceCode, TicketRecord, TransportMode};

use super::{StoreError, StoreSet, TicketStore};

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Columns fetched for the statistics projection.
const DEPARTURE_COLUMNS: &str = "id,departure_date,departure_time";

/// Longest slice of an unparseable body kept in an error message.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the REST client.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// API key, sent both as `apikey` and as a bearer token
    pub api_key: String,
    /// Project base URL (without the `/rest/v1` suffix)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RestConfig {
    /// Create a new config for the given endpoint and key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Shared HTTP client for the ticket tables.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl RestClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RestConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let invalid_key = || StoreError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        };
        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| invalid_key())?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| invalid_key())?;
        headers.insert(HeaderName::from_static("apikey"), api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// A store for one mode's table, sharing this client.
    pub fn store(&self, mode: TransportMode) -> RestStore {
        RestStore {
            client: self.clone(),
            mode,
        }
    }

    /// Stores for all three tables.
    pub fn stores(&self) -> StoreSet<RestStore> {
        StoreSet::from_fn(|mode| self.store(mode))
    }

    fn table_url(&self, mode: TransportMode) -> String {
        format!("{}/rest/v1/{}", self.base_url, mode.table())
    }

    /// Run a filtered select against a table and return the raw rows.
    async fn select(
        &self,
        mode: TransportMode,
        query: &[(&str, String)],
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| StoreError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .get(self.table_url(mode))
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(StoreError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_rows(&body)
    }
}

/// Record store backed by one table of a [`RestClient`].
#[derive(Debug, Clone)]
pub struct RestStore {
    client: RestClient,
    mode: TransportMode,
}

impl RestStore {
    pub fn mode(&self) -> TransportMode {
        self.mode
    }
}

impl TicketStore for RestStore {
    async fn find_by_reference(
        &self,
        code: &ReferenceCode,
    ) -> Result<Option<TicketRecord>, StoreError> {
        let rows = self
            .client
            .select(
                self.mode,
                &[
                    ("pnr_number", format!("eq.{}", code.as_str())),
                    ("select", "*".to_string()),
                ],
            )
            .await?;

        debug!(mode = %self.mode, rows = rows.len(), "reference lookup returned");
        single_record(self.mode, code, &rows)
    }

    async fn list_departures(&self) -> Result<Vec<DepartureSlot>, StoreError> {
        let rows = self
            .client
            .select(self.mode, &[("select", DEPARTURE_COLUMNS.to_string())])
            .await?;

        debug!(mode = %self.mode, rows = rows.len(), "departure projection returned");
        parse_departures(&rows)
    }
}

/// Parse a response body as an array of rows.
fn parse_rows(body: &str) -> Result<Vec<serde_json::Value>, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Json {
        message: format!(
            "{e} (body: {})",
            body.chars().take(BODY_SNIPPET_CHARS).collect::<String>()
        ),
    })
}

/// Decode projection rows. An unreadable date or time leaves that slot
/// without a departure; a row that is not an object fails.
fn parse_departures(rows: &[serde_json::Value]) -> Result<Vec<DepartureSlot>, StoreError> {
    rows.iter()
        .map(|row| {
            DepartureSlot::deserialize(row).map_err(|e| StoreError::Json {
                message: e.to_string(),
            })
        })
        .collect()
}

/// Reduce the rows of a point lookup to at most one record.
fn single_record(
    mode: TransportMode,
    code: &ReferenceCode,
    rows: &[serde_json::Value],
) -> Result<Option<TicketRecord>, StoreError> {
    match rows {
        [] => Ok(None),
        [row] => TicketRecord::from_row(mode, row)
            .map(Some)
            .map_err(|e| StoreError::Json {
                message: e.to_string(),
            }),
        _ => Err(StoreError::Duplicate {
            code: code.to_string(),
            count: rows.len(),
        }),
    }
}
