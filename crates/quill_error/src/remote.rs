//! Remote completion service errors and retry classification.

/// Failure conditions reported by a remote completion service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RemoteServiceErrorKind {
    /// Connection could not be established or broke mid-transfer
    #[display("Network failure: {}", _0)]
    Network(String),
    /// Transport timeout (connect or overall request)
    #[display("Request timed out: {}", _0)]
    Timeout(String),
    /// Non-success HTTP status (auth failure, rate limiting, overload, ...)
    #[display("HTTP {} error: {}", status, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Response body or stream event could not be decoded
    #[display("Malformed response: {}", _0)]
    Malformed(String),
    /// The service reported an error inside an open event stream
    #[display("Stream error event ({}): {}", error_type, message)]
    StreamEvent {
        /// Provider error type (e.g. `overloaded_error`)
        error_type: String,
        /// Provider error message
        message: String,
    },
}

impl RemoteServiceErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteServiceErrorKind::Status { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504 | 529)
            }
            RemoteServiceErrorKind::Network(_) => true,
            RemoteServiceErrorKind::Timeout(_) => true,
            RemoteServiceErrorKind::StreamEvent { error_type, .. } => {
                error_type == "overloaded_error"
            }
            RemoteServiceErrorKind::Malformed(_) => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            RemoteServiceErrorKind::Status { status, .. } => match *status {
                429 => (5000, 3, 40),
                503 | 529 => (2000, 4, 30),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 3, 20),
                _ => (1000, 3, 10),
            },
            RemoteServiceErrorKind::Network(_) => (500, 3, 8),
            RemoteServiceErrorKind::Timeout(_) => (1000, 2, 10),
            _ => (1000, 3, 10),
        }
    }
}

/// Remote completion service error with source location tracking.
///
/// # Examples
///
/// ```
/// use quill_error::{RemoteServiceError, RemoteServiceErrorKind, RetryableError};
///
/// let err = RemoteServiceError::new(RemoteServiceErrorKind::Status {
///     status: 401,
///     message: "invalid x-api-key".to_string(),
/// });
/// assert!(!err.is_retryable());
/// assert!(format!("{}", err).contains("401"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Remote Service Error: {} at line {} in {}", kind, line, file)]
pub struct RemoteServiceError {
    /// The kind of error that occurred
    pub kind: RemoteServiceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RemoteServiceError {
    /// Create a new RemoteServiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RemoteServiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use quill_error::{RemoteServiceError, RemoteServiceErrorKind, RetryableError};
///
/// let err = RemoteServiceError::new(RemoteServiceErrorKind::Status {
///     status: 529,
///     message: "Overloaded".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 4);
/// assert_eq!(max_delay, 30);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 529 (overloaded), 429 (rate limit) or network
    /// timeouts return true. Permanent errors like 401 (unauthorized) or
    /// 400 (bad request) return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (1000, 3, 10)
    }
}

impl RetryableError for RemoteServiceError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
