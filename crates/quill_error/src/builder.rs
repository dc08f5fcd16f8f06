//! Errors from derive_builder request builders.

/// Why a request could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("Field `{}` was not set", _0)]
    MissingField(String),

    /// A field was set to an unusable value
    #[display("Invalid request: {}", _0)]
    Invalid(String),
}

/// Request assembly failure with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Wrap `kind`, recording the caller's location.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

/// Classify a derive_builder message.
///
/// Uninitialized-field messages look like ``"`model` must be initialized"``.
///
/// # Examples
///
/// ```
/// use quill_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::from("`model` must be initialized".to_string());
/// assert_eq!(err.kind(), &BuilderErrorKind::MissingField("model".to_string()));
/// ```
impl From<String> for BuilderError {
    #[track_caller]
    fn from(message: String) -> Self {
        let field = message
            .strip_suffix("` must be initialized")
            .and_then(|rest| rest.strip_prefix('`'));
        match field {
            Some(field) => Self::new(BuilderErrorKind::MissingField(field.to_string())),
            None => Self::new(BuilderErrorKind::Invalid(message)),
        }
    }
}
