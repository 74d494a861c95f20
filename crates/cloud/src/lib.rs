//! # geoleaf Cloud
//!
//! Network collaborators for `geoleaf_core::Map`: a GeoJSON reader for
//! `http(s)://` URLs and a raster tile client for TiTiler-compatible servers.
//!
//! Requests are sent once, with an optional timeout and no retries. Errors
//! reach the map as `geoleaf_core::Error::Fetch`, where they become a logged
//! no-op.
//!
//! ## Features
//!
//! - `native` (default): blocking API and the `VectorReader` / `TileService`
//!   implementations, driven by a private Tokio runtime

pub mod error;
pub mod geojson_reader;
pub mod http;
pub mod sync_api;
pub mod tile_client;

pub use error::{CloudError, Result};
pub use http::{HttpClient, HttpOptions};
pub use tile_client::{CogInfo, TileEndpoint, DEFAULT_ENDPOINT};

#[cfg(feature = "native")]
pub use sync_api::{BlockingClient, GeoJsonReader, TileClient};

/// Blocking API re-exported as `blocking` module (native only).
#[cfg(feature = "native")]
pub mod blocking {
    pub use crate::sync_api::*;
}
