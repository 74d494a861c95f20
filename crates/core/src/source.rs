//! Collaborators that turn locations into layer data.
//!
//! The map never fetches anything itself. Vector locations go through a
//! [`VectorReader`], raster locations through a [`TileService`]. Remote
//! implementations live in `geoleaf-cloud`; this module ships a local-file
//! reader so a map works offline.

use std::path::Path;

use geoleaf_colormap::ColorScheme;

use crate::basemap::TileSource;
use crate::error::{Error, Result};
use crate::geo::LatLngBounds;
use crate::vector::FeatureCollection;

/// Reads a vector location (URL or path) into features.
pub trait VectorReader {
    fn read_features(&self, location: &str) -> Result<FeatureCollection>;
}

/// Parameters of a raster tile request.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterRequest<'a> {
    /// URL or path of the raster resource.
    pub location: &'a str,
    pub colormap: Option<ColorScheme>,
}

/// Tiles served for one raster resource.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterTiles {
    pub tiles: TileSource,
    pub bounds: Option<LatLngBounds>,
}

/// Produces an XYZ tile layer for a raster resource.
pub trait TileService {
    fn raster_tiles(&self, request: &RasterRequest<'_>) -> Result<RasterTiles>;
}

/// Reads GeoJSON files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalReader;

impl VectorReader for LocalReader {
    fn read_features(&self, location: &str) -> Result<FeatureCollection> {
        if location.contains("://") {
            return Err(Error::fetch(
                location,
                "remote locations need a network reader",
            ));
        }
        read_geojson_file(Path::new(location))
    }
}

/// Read and parse a GeoJSON file.
pub fn read_geojson_file(path: &Path) -> Result<FeatureCollection> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::fetch(path.display().to_string(), e))?;
    FeatureCollection::from_geojson_str(&text)
        .map_err(|e| Error::fetch(path.display().to_string(), e))
}
