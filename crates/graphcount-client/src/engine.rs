//! HTTP client for the graph engine's count query.
//!
//! The engine exposes one endpoint per graph database:
//!
//! ```text
//! GET {engine_url}/api/v1/graphs/{db_name}/count
//! ```
//!
//! A successful answer is the JSON form of [`EngineCounts`]. Any other status
//! is reported as [`AppError::ProviderError`], using the `code` and `message`
//! fields of the engine's error body when it sends one.

use std::time::Duration;

use graphcount_core::HttpConfig;
use graphcount_core::error::AppError;
use graphcount_core::models::{EngineCounts, GraphRecord};
use graphcount_core::traits::GraphCountProvider;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::debug;

/// Error body returned by the graph engine on non-success statuses.
#[derive(Deserialize, Debug)]
struct EngineErrorBody {
    code: Option<Value>,
    message: Option<String>,
}

/// HTTP client for graph engine instances.
///
/// Each graph may live on a different engine instance. The catalog's
/// `engine_url` wins; the client's default engine is used otherwise.
///
/// # Examples
///
/// ```no_run
/// use graphcount_client::GraphEngineClient;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GraphEngineClient::new(Some("http://graph-engine:8080"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GraphEngineClient {
    client: Client,
    default_engine: Option<Url>,
    http_config: HttpConfig,
}

impl GraphEngineClient {
    /// Creates a client with the default HTTP configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidUrl` if the default engine URL is malformed.
    /// Returns `AppError::ClientError` if the HTTP client cannot be built.
    pub fn new(default_engine_url: Option<&str>) -> Result<Self, AppError> {
        Self::with_config(default_engine_url, HttpConfig::default())
    }

    /// Creates a client with a custom HTTP configuration.
    pub fn with_config(
        default_engine_url: Option<&str>,
        http_config: HttpConfig,
    ) -> Result<Self, AppError> {
        let default_engine = default_engine_url.map(parse_engine_url).transpose()?;

        let client = Client::builder()
            .user_agent(concat!("graphcount/", env!("CARGO_PKG_VERSION")))
            .timeout(http_config.timeout)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            default_engine,
            http_config,
        })
    }

    /// Resolves the engine instance hosting a graph.
    fn engine_for(&self, graph: &GraphRecord) -> Result<Url, AppError> {
        match graph.engine_url.as_deref() {
            Some(url) => parse_engine_url(url),
            None => self.default_engine.clone().ok_or_else(|| {
                AppError::InvalidUrl(format!(
                    "no graph engine configured for graph {} (graph_db_id {:?})",
                    graph.id, graph.graph_db_id
                ))
            }),
        }
    }

    /// Runs the count query for `db_name` on the given engine.
    pub async fn fetch_counts(&self, engine: &Url, db_name: &str) -> Result<EngineCounts, AppError> {
        let url = count_url(engine, db_name)?;
        debug!(%url, "requesting graph counts");

        let resp = self.request_with_retry(&url).await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(provider_error(status, &body));
        }

        resp.json::<EngineCounts>()
            .await
            .map_err(|e| AppError::ClientError(e.to_string()))
    }

    /// Sends a GET request, retrying connection failures and timeouts.
    ///
    /// Any HTTP response, successful or not, is returned to the caller.
    async fn request_with_retry(&self, url: &Url) -> Result<reqwest::Response, AppError> {
        let max_retries = self.http_config.max_retries.max(1);
        let base_delay = self.http_config.retry_base_delay;
        let mut last_error = AppError::Generic("No attempts made".to_string());

        for attempt in 1..=max_retries {
            match self.client.get(url.clone()).send().await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if e.is_timeout() {
                        last_error = AppError::Timeout(self.http_config.timeout.as_secs());
                    } else if e.is_connect() {
                        last_error = AppError::NetworkError(format!("Connection failed: {}", e));
                    } else {
                        last_error = AppError::ClientError(e.to_string());
                    }

                    if attempt < max_retries && (e.is_timeout() || e.is_connect()) {
                        let delay: Duration = base_delay * attempt;
                        sleep(delay).await;
                        continue;
                    }
                    break;
                }
            }
        }

        Err(last_error)
    }
}

impl GraphCountProvider for GraphEngineClient {
    async fn count(&self, graph: &GraphRecord, db_name: &str) -> Result<EngineCounts, AppError> {
        let engine = self.engine_for(graph)?;
        self.fetch_counts(&engine, db_name).await
    }
}

fn parse_engine_url(raw: &str) -> Result<Url, AppError> {
    Url::parse(raw).map_err(|_| AppError::InvalidUrl(raw.to_string()))
}

/// Builds `{engine}/api/v1/graphs/{db_name}/count`, percent-encoding the name.
fn count_url(engine: &Url, db_name: &str) -> Result<Url, AppError> {
    let mut url = engine.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::InvalidUrl(engine.to_string()))?
        .pop_if_empty()
        .extend(["api", "v1", "graphs", db_name, "count"]);
    Ok(url)
}

/// Converts a non-success engine answer into `AppError::ProviderError`.
fn provider_error(status: StatusCode, body: &str) -> AppError {
    let fallback_code = format!("HTTP {}", status.as_u16());
    let fallback_message = || {
        let text = body.trim();
        if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            text.to_string()
        }
    };

    match serde_json::from_str::<EngineErrorBody>(body) {
        Ok(parsed) => AppError::ProviderError {
            code: match parsed.code {
                Some(Value::String(code)) => code,
                Some(Value::Null) | None => fallback_code,
                Some(other) => other.to_string(),
            },
            message: parsed.message.unwrap_or_else(fallback_message),
        },
        Err(_) => AppError::ProviderError {
            code: fallback_code,
            message: fallback_message(),
        },
    }
}
