//! Map layers: basemap tiles, vector features, raster tiles.

use std::fmt;

use geoleaf_colormap::ColorScheme;
use serde::{Deserialize, Serialize};

use crate::basemap::TileSource;
use crate::geo::LatLngBounds;
use crate::style::{Style, StyleMap};
use crate::vector::FeatureCollection;

/// What kind of overlay a layer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Basemap,
    Vector,
    Raster,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basemap => "basemap",
            Self::Vector => "vector",
            Self::Raster => "raster",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Features plus the options used to draw them.
#[derive(Debug, Clone)]
pub struct VectorData {
    pub features: FeatureCollection,
    pub style: Style,
    /// Style applied while the pointer hovers a feature.
    pub highlight_style: Option<Style>,
    /// Circle-marker options for point geometries.
    pub point_style: Option<StyleMap>,
}

/// Raster tiles produced by a tile service.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterData {
    pub tiles: TileSource,
    pub bounds: Option<LatLngBounds>,
    /// Colormap the tiles were rendered with, if any.
    pub colormap: Option<ColorScheme>,
}

/// Layer payload.
#[derive(Debug, Clone)]
pub enum LayerBody {
    Tiles(TileSource),
    Vector(VectorData),
    Raster(RasterData),
}

/// A named overlay attached to a map display.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Wrap in a named feature group when drawn.
    pub grouped: bool,
    pub body: LayerBody,
}

impl Layer {
    pub fn basemap(name: impl Into<String>, tiles: TileSource) -> Self {
        Self::with_body(name, LayerKind::Basemap, LayerBody::Tiles(tiles))
    }

    pub fn vector(name: impl Into<String>, data: VectorData) -> Self {
        Self::with_body(name, LayerKind::Vector, LayerBody::Vector(data))
    }

    pub fn raster(name: impl Into<String>, data: RasterData) -> Self {
        Self::with_body(name, LayerKind::Raster, LayerBody::Raster(data))
    }

    fn with_body(name: impl Into<String>, kind: LayerKind, body: LayerBody) -> Self {
        Self {
            name: name.into(),
            kind,
            visible: true,
            opacity: 1.0,
            grouped: false,
            body,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    /// Number of features for vector layers, zero otherwise.
    pub fn feature_count(&self) -> usize {
        match &self.body {
            LayerBody::Vector(v) => v.features.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basemap_defaults() {
        let l = Layer::basemap("OSM", TileSource::new("u/{z}/{x}/{y}", "", 19));
        assert_eq!(l.kind, LayerKind::Basemap);
        assert!(l.visible);
        assert!(!l.grouped);
        assert_eq!(l.opacity, 1.0);
        assert_eq!(l.feature_count(), 0);
    }

    #[test]
    fn opacity_is_clamped() {
        let l = Layer::basemap("OSM", TileSource::new("u", "", 19)).with_opacity(1.7);
        assert_eq!(l.opacity, 1.0);
        let l = l.with_opacity(-0.2);
        assert_eq!(l.opacity, 0.0);
    }
}
