//! Raster tiles from a TiTiler-compatible dynamic tile server.
//!
//! A raster resource (COG URL, or a path the server can read) is validated
//! with `GET {endpoint}/cog/info?url=...`; its geographic bounds come from
//! the same response. Tiles are then served from
//! `{endpoint}/cog/tiles/WebMercatorQuad/{z}/{x}/{y}.png?url=...`, with a
//! `colormap_name` parameter when a colormap is requested.

use geoleaf_colormap::ColorScheme;
use geoleaf_core::source::{RasterRequest, RasterTiles};
use geoleaf_core::{LatLngBounds, TileSource};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CloudError, Result};
use crate::http::HttpClient;

/// Default endpoint: a TiTiler instance on localhost.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

const TILE_PATH: &str = "cog/tiles/WebMercatorQuad/{z}/{x}/{y}.png";

/// Subset of the `/cog/info` response we use.
#[derive(Debug, Clone, Deserialize)]
pub struct CogInfo {
    /// `[west, south, east, north]`.
    #[serde(default)]
    pub bounds: Option<[f64; 4]>,
    #[serde(default)]
    pub maxzoom: Option<u8>,
}

/// Root URL of a tile server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileEndpoint {
    base: String,
}

impl TileEndpoint {
    /// Parse and normalise `base` (trailing slashes removed).
    pub fn new(base: &str) -> Result<Self> {
        let base = base.trim().trim_end_matches('/');
        let url = Url::parse(base).map_err(|e| CloudError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CloudError::InvalidUrl {
                url: base.to_string(),
                reason: "tile endpoint must be http or https".into(),
            });
        }
        Ok(Self {
            base: base.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Metadata URL for `location`.
    pub fn info_url(&self, location: &str) -> Result<String> {
        let url = format!("{}/cog/info", self.base);
        Url::parse_with_params(&url, &[("url", location)])
            .map(String::from)
            .map_err(|e| CloudError::InvalidUrl {
                url,
                reason: e.to_string(),
            })
    }

    /// XYZ template for `location`, keeping `{z}/{x}/{y}` unescaped.
    pub fn tile_template(&self, location: &str, colormap: Option<ColorScheme>) -> Result<String> {
        let mut params = vec![("url", location)];
        if let Some(scheme) = colormap {
            params.push(("colormap_name", scheme.server_name()));
        }
        // Encode the query on a placeholder-free URL, then splice it on.
        let probe = format!("{}/cog/tiles", self.base);
        let encoded =
            Url::parse_with_params(&probe, &params).map_err(|e| CloudError::InvalidUrl {
                url: probe,
                reason: e.to_string(),
            })?;
        let query = encoded.query().unwrap_or_default();
        Ok(format!("{}/{TILE_PATH}?{query}", self.base))
    }
}

impl Default for TileEndpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Validate `request.location` with the server and build its tile layer.
pub async fn fetch_raster_tiles(
    client: &HttpClient,
    endpoint: &TileEndpoint,
    request: &RasterRequest<'_>,
) -> Result<RasterTiles> {
    let info: CogInfo = client.get_json(&endpoint.info_url(request.location)?).await?;
    let tiles = raster_tiles_from_info(endpoint, request, &info)?;
    debug!(
        location = request.location,
        bounds = ?tiles.bounds,
        "raster tiles ready"
    );
    Ok(tiles)
}

fn raster_tiles_from_info(
    endpoint: &TileEndpoint,
    request: &RasterRequest<'_>,
    info: &CogInfo,
) -> Result<RasterTiles> {
    let url = endpoint.tile_template(request.location, request.colormap)?;
    // Leaflet hides a layer past its maxZoom; the server overzooms instead.
    let max_zoom = info.maxzoom.unwrap_or(22).max(18);
    let bounds = info
        .bounds
        .map(|[w, s, e, n]| LatLngBounds::from_wsen(w, s, e, n));
    Ok(RasterTiles {
        tiles: TileSource::new(url, "", max_zoom),
        bounds,
    })
}
