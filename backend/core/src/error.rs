use thiserror::Error;

/// Failure taxonomy for a single lookup/capture request.
///
/// A search that completes without an exact match is not an error; it is
/// reported as [`crate::Resolution::NotFound`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing parameter or unrecognized world. Raised before any I/O.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network, status or decode failure while searching.
    #[error("lookup failed: {0}")]
    LookupFailed(String),

    /// Navigation timeout, missing keep element, or screenshot I/O error.
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PipelineError {
    /// Whether re-issuing the same command could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LookupFailed(_) | Self::CaptureFailed(_))
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_io_failures_are_retryable() {
        assert!(PipelineError::LookupFailed("timeout".into()).is_retryable());
        assert!(PipelineError::CaptureFailed("no element".into()).is_retryable());
        assert!(!PipelineError::InvalidInput("world".into()).is_retryable());
        assert!(!PipelineError::Storage("disk".into()).is_retryable());
    }

    #[test]
    fn display_includes_category() {
        let err = PipelineError::CaptureFailed("selector `.x` matched nothing".into());
        assert_eq!(err.to_string(), "capture failed: selector `.x` matched nothing");
    }
}
