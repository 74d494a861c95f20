//! Error types for remote data access.

use thiserror::Error;

/// Errors produced while fetching remote layer data.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unexpected response from {url}: {reason}")]
    Response { url: String, reason: String },

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] geoleaf_core::Error),
}

impl CloudError {
    /// Wrap as a core fetch error for `location`.
    pub fn into_fetch(self, location: &str) -> geoleaf_core::Error {
        match self {
            CloudError::Core(e) => e,
            other => geoleaf_core::Error::fetch(location, other),
        }
    }
}

/// Result alias for cloud operations.
pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message() {
        let e = CloudError::Status {
            url: "https://example.com/a.geojson".into(),
            status: 404,
        };
        assert_eq!(e.to_string(), "HTTP 404 fetching https://example.com/a.geojson");
    }

    #[test]
    fn core_errors_pass_through() {
        let e = CloudError::Core(geoleaf_core::Error::MissingUrl).into_fetch("x");
        assert!(matches!(e, geoleaf_core::Error::MissingUrl));
        let e = CloudError::Runtime("boom".into()).into_fetch("x");
        assert!(matches!(e, geoleaf_core::Error::Fetch { .. }));
    }
}
