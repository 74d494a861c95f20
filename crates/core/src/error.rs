//! Error types for geoleaf

use thiserror::Error;

/// Boxed error produced by an external collaborator (reader, tile service).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reasons a map operation was skipped or substituted.
///
/// Map operations never return these as `Err`: they are logged and carried
/// inside an [`Outcome`](crate::map::Outcome) so callers can inspect them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("basemap {0:?} not found in catalog")]
    UnknownBasemap(String),

    #[error("position {0:?} is not a map corner")]
    InvalidPosition(String),

    #[error("unknown colormap {0:?}")]
    UnknownColormap(String),

    #[error("provide only one of a URL or in-memory data")]
    ConflictingSources,

    #[error("provide either a URL or in-memory data")]
    MissingSource,

    #[error("a raster URL is required")]
    MissingUrl,

    #[error("layer {0:?} not found")]
    LayerNotFound(String),

    #[error("layer control does not exist")]
    NoLayerControl,

    #[error("no tile service configured for raster layers")]
    NoTileService,

    #[error("failed to load {location}: {source}")]
    Fetch {
        location: String,
        #[source]
        source: BoxError,
    },

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a collaborator failure for `location`.
    pub fn fetch(location: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Fetch {
            location: location.into(),
            source: source.into(),
        }
    }

    /// True for invalid-argument failures (bad names, positions, sources).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::UnknownBasemap(_)
                | Error::InvalidPosition(_)
                | Error::UnknownColormap(_)
                | Error::ConflictingSources
                | Error::MissingSource
                | Error::MissingUrl
        )
    }

    /// True when the operation referred to something that was never added.
    pub fn is_missing_entity(&self) -> bool {
        matches!(self, Error::LayerNotFound(_) | Error::NoLayerControl)
    }
}

/// Result type alias for geoleaf operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy() {
        assert!(Error::UnknownBasemap("x".into()).is_invalid_argument());
        assert!(Error::ConflictingSources.is_invalid_argument());
        assert!(Error::NoLayerControl.is_missing_entity());
        let fetch = Error::fetch("http://nowhere", "connection refused");
        assert!(!fetch.is_invalid_argument());
        assert!(!fetch.is_missing_entity());
        assert_eq!(
            fetch.to_string(),
            "failed to load http://nowhere: connection refused"
        );
    }
}
