//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, RemoteServiceError, ServerError};

/// Every failure a Quill operation can surface.
///
/// # Examples
///
/// ```
/// use quill_error::{QuillError, RemoteServiceError, RemoteServiceErrorKind};
///
/// let remote = RemoteServiceError::new(RemoteServiceErrorKind::Network("reset".into()));
/// let err: QuillError = remote.into();
/// assert!(err.is_remote());
/// assert!(format!("{}", err).contains("Network failure"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum QuillErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Remote completion service error
    #[from(RemoteServiceError)]
    Remote(RemoteServiceError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// HTTP boundary error
    #[from(ServerError)]
    Server(ServerError),
}

/// Quill error with kind discrimination.
///
/// # Examples
///
/// ```
/// use quill_error::{ConfigError, QuillResult};
///
/// fn might_fail() -> QuillResult<()> {
///     Err(ConfigError::new("CLAUDE_MODEL_ID is empty"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Quill Error: {}", _0)]
pub struct QuillError(Box<QuillErrorKind>);

impl QuillError {
    /// Create a new error from a kind.
    pub fn new(kind: QuillErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QuillErrorKind {
        &self.0
    }

    /// True when the remote completion service caused the failure.
    pub fn is_remote(&self) -> bool {
        matches!(*self.0, QuillErrorKind::Remote(_))
    }

    /// True for configuration failures.
    pub fn is_config(&self) -> bool {
        matches!(*self.0, QuillErrorKind::Config(_))
    }
}

// Generic From implementation for any type that converts to QuillErrorKind
impl<T> From<T> for QuillError
where
    T: Into<QuillErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Quill operations.
pub type QuillResult<T> = std::result::Result<T, QuillError>;
