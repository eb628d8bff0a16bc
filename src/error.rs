use thiserror::Error;

/// Errors raised by the report core and the boundary record layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A caller passed an argument outside its contract (day offset,
    /// parameter key, timezone name, multi-day input).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A single backend record failed validation.
    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

impl ReportError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ReportError::InvalidArgument(msg.into())
    }
}
