//! Error taxonomy for source adapters and the aggregator.

use crate::listing::Platform;
use thiserror::Error;

/// Failure of a single upstream source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport error, timeout, or non-2xx response.
    #[error("{} unavailable: {reason}", .platform.id())]
    Unavailable { platform: Platform, reason: String },

    /// Response arrived but did not have the expected shape.
    #[error("{} returned malformed data: {reason}", .platform.id())]
    Malformed { platform: Platform, reason: String },
}

impl SourceError {
    pub fn unavailable(platform: Platform, reason: impl Into<String>) -> Self {
        SourceError::Unavailable { platform, reason: reason.into() }
    }

    pub fn malformed(platform: Platform, reason: impl Into<String>) -> Self {
        SourceError::Malformed { platform, reason: reason.into() }
    }

    /// Platform the failure came from.
    pub fn platform(&self) -> Platform {
        match self {
            SourceError::Unavailable { platform, .. } | SourceError::Malformed { platform, .. } => {
                *platform
            }
        }
    }
}

/// Request-level search failure.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Keyword missing or blank.
    #[error("search keyword must not be empty")]
    InvalidRequest,

    /// Unexpected failure outside the sources themselves.
    #[error("internal search failure: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_messages() {
        let err = SourceError::unavailable(Platform::Bunjang, "status 503");
        assert_eq!(err.to_string(), "bunjang unavailable: status 503");
        assert_eq!(err.platform(), Platform::Bunjang);

        let err = SourceError::malformed(Platform::Joongna, "no __NEXT_DATA__");
        assert_eq!(err.to_string(), "joongna returned malformed data: no __NEXT_DATA__");
        assert_eq!(err.platform(), Platform::Joongna);
    }

    #[test]
    fn test_search_error_messages() {
        assert_eq!(SearchError::InvalidRequest.to_string(), "search keyword must not be empty");
        assert!(SearchError::Internal("panicked".into()).to_string().contains("panicked"));
    }
}
