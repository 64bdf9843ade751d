use thiserror::Error;

/// Application-wide error types.
///
/// This enum represents every failure the graph statistics core can report.
/// It uses the `thiserror` crate for ergonomic error handling and automatic
/// conversion from underlying library errors.
///
/// # Error Conversion
///
/// - `sqlx::Error` → `AppError::DatabaseError`
/// - `serde_json::Error` → `AppError::SerializationError`
///
/// # Provider failures
///
/// The graph engine can fail in two different ways, and the core treats them
/// differently:
///
/// - [`AppError::ProviderError`] is an explicit non-success answer from the
///   engine. It is propagated to the caller and aborts a fleet rollup.
/// - Transport-level faults ([`AppError::NetworkError`], [`AppError::Timeout`],
///   [`AppError::ClientError`], [`AppError::SerializationError`],
///   [`AppError::EmptyResponse`]) are recovered by the aggregator as zero counts.
///   See [`AppError::is_provider_fault`].
///
/// # Examples
///
/// ```
/// use graphcount_core::error::AppError;
///
/// fn example() -> Result<(), AppError> {
///     Err(AppError::InvalidGraphId("abc".to_string()))
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Metadata catalog query failed.
    ///
    /// Wraps all errors from SQLx database operations, including connection
    /// failures and query errors.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// The graph id is not a non-negative integer.
    #[error("Invalid graph id: '{0}' (graph_id must be int)")]
    InvalidGraphId(String),

    /// The graph id is well-formed but unknown to the catalog.
    #[error("Graph not found: {0}")]
    GraphNotFound(i64),

    /// The graph engine answered the count request with a non-success status.
    #[error("Graph engine error ({code}): {message}")]
    ProviderError { code: String, message: String },

    /// The precomputed rollup could not be read from the cache.
    ///
    /// Covers an unreachable cache as well as a missing or undecodable key.
    #[error("Rollup cache unavailable: {0}")]
    CacheUnavailable(String),

    /// HTTP client request failed.
    #[error("API Client error: {0}")]
    ClientError(String),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid URL provided for an external service.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// API response contained no data.
    #[error("Empty response from API")]
    EmptyResponse,

    /// Network or connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic application error for cases not covered by specific variants.
    ///
    /// Use this sparingly - prefer creating specific error variants.
    #[error("Error: {0}")]
    Generic(String),
}

impl AppError {
    /// Returns a user-friendly error message suitable for CLI output.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DatabaseError(e) => {
                if e.to_string().contains("connection") {
                    "Cannot connect to the metadata database. Is PostgreSQL running?\n   Check DATABASE_URL.".to_string()
                } else {
                    format!("Database error: {}", e)
                }
            }
            AppError::InvalidGraphId(raw) => {
                format!("Invalid graph id '{}'.\n   Graph ids are non-negative integers.", raw)
            }
            AppError::GraphNotFound(id) => {
                format!("Graph {} does not exist in the catalog.", id)
            }
            AppError::ProviderError { code, message } => {
                format!(
                    "The graph engine refused the count request ({}): {}",
                    code, message
                )
            }
            AppError::CacheUnavailable(msg) => {
                format!(
                    "Cached rollup unavailable: {}\n   Run `graphcount refresh` or check REDIS_URL.",
                    msg
                )
            }
            AppError::NetworkError(msg) => {
                format!("Network error: {}\n   Check that the graph engine is reachable.", msg)
            }
            AppError::Timeout(secs) => {
                format!("Request timed out after {} seconds.\n   The graph engine may be overloaded.", secs)
            }
            AppError::ConfigError(msg) => {
                format!("Configuration error: {}\n   Check your environment variables.", msg)
            }
            _ => self.to_string(),
        }
    }

    /// Returns true if this error is an unexpected fault of the count provider.
    ///
    /// Faults are recovered by the aggregator as an all-zero snapshot so that a
    /// single misbehaving graph cannot break a fleet rollup. Explicit engine
    /// errors, validation errors and catalog errors are not faults.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphcount_core::error::AppError;
    ///
    /// assert!(AppError::NetworkError("connection reset".to_string()).is_provider_fault());
    ///
    /// let refused = AppError::ProviderError {
    ///     code: "HTTP 500".to_string(),
    ///     message: "space not found".to_string(),
    /// };
    /// assert!(!refused.is_provider_fault());
    /// ```
    pub fn is_provider_fault(&self) -> bool {
        match self {
            AppError::NetworkError(_)
            | AppError::Timeout(_)
            | AppError::ClientError(_)
            | AppError::SerializationError(_)
            | AppError::EmptyResponse
            | AppError::InvalidUrl(_)
            | AppError::Generic(_) => true,

            AppError::DatabaseError(_)
            | AppError::InvalidGraphId(_)
            | AppError::GraphNotFound(_)
            | AppError::ProviderError { .. }
            | AppError::CacheUnavailable(_)
            | AppError::ConfigError(_) => false,
        }
    }
}
