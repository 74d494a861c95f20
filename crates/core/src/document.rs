//! Declarative map documents (JSON).
//!
//! A document lists the view options and the layers to add; [`MapDocument::apply`]
//! replays it through the regular [`Map`] operations, so a document gets the
//! same fallbacks and warnings as code calling the map directly.
//!
//! ```json
//! {
//!   "flavor": "folium",
//!   "center": {"lat": 40.0, "lng": -100.0},
//!   "zoom": 4,
//!   "basemaps": ["CartoDB.Positron"],
//!   "vectors": [{"name": "states", "url": "states.geojson", "style": {"color": "black"}}],
//!   "rasters": [{"name": "dem", "url": "https://example.com/dem.tif", "colormap": "terrain"}],
//!   "layer_control": "topright"
//! }
//! ```

use geojson::GeoJson;
use serde::{Deserialize, Serialize};

use crate::display::{MapDisplay, MapOptions};
use crate::error::{Error, Result};
use crate::geo::LatLng;
use crate::map::{Flavor, Map, Outcome, VectorOptions};
use crate::style::StyleMap;
use crate::vector::FeatureCollection;

fn default_opacity() -> f32 {
    1.0
}

/// A vector layer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSpec {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Inline GeoJSON.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub style: Option<StyleMap>,
    #[serde(default, alias = "hover_style")]
    pub highlight_style: Option<StyleMap>,
    #[serde(default)]
    pub point_style: Option<StyleMap>,
}

/// A raster layer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterSpec {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub colormap: Option<String>,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

/// Whole-map description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapDocument {
    pub flavor: Flavor,
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
    pub height: Option<String>,
    /// Extra Leaflet options.
    pub options: serde_json::Map<String, serde_json::Value>,
    pub basemaps: Vec<String>,
    pub vectors: Vec<VectorSpec>,
    pub rasters: Vec<RasterSpec>,
    pub layer_control: Option<String>,
}

/// What happened to each document entry, in application order.
pub type Report = Vec<(String, Outcome)>;

impl MapDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Flavour defaults overridden by the document's view fields.
    pub fn map_options(&self) -> MapOptions {
        let mut options = self.flavor.default_options();
        if let Some(center) = self.center {
            options.center = center;
        }
        if let Some(zoom) = self.zoom {
            options.zoom = zoom;
        }
        if let Some(height) = &self.height {
            options.height = height.clone();
        }
        options.extra.extend(self.options.clone());
        options
    }

    /// A fresh canvas-backed map for this document, with no layers yet.
    pub fn new_map(&self) -> Map {
        Map::new(self.flavor, self.map_options())
    }

    /// Add every entry to `map`: basemaps, vectors, rasters, then the control.
    pub fn apply<D: MapDisplay>(&self, map: &mut Map<D>) -> Report {
        let mut report = Report::new();

        for name in &self.basemaps {
            report.push((name.clone(), map.add_basemap(name)));
        }

        for spec in &self.vectors {
            let outcome = match spec.to_options() {
                Ok(options) => map.add_vector(&spec.name, options),
                Err(e) => {
                    tracing::warn!(layer = %spec.name, "{e}");
                    Outcome::Skipped(e)
                }
            };
            report.push((spec.name.clone(), outcome));
        }

        for spec in &self.rasters {
            let outcome = map.add_raster(
                spec.url.as_deref(),
                &spec.name,
                spec.colormap.as_deref(),
                spec.opacity,
            );
            report.push((spec.name.clone(), outcome));
        }

        if let Some(position) = &self.layer_control {
            report.push(("layer_control".to_string(), map.add_layer_control(position)));
        }

        report
    }
}

impl VectorSpec {
    fn to_options(&self) -> Result<VectorOptions> {
        let data = match &self.data {
            Some(value) => Some(FeatureCollection::from_geojson(GeoJson::from_json_value(
                value.clone(),
            )?)?),
            None => None,
        };
        Ok(VectorOptions {
            url: self.url.clone(),
            data,
            style: self.style.clone().map(Into::into),
            highlight_style: self.highlight_style.clone().map(Into::into),
            point_style: self.point_style.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_document() {
        let doc = MapDocument::from_json_str("{}").unwrap();
        assert_eq!(doc.flavor, Flavor::Leaflet);
        assert!(doc.basemaps.is_empty());
        assert_eq!(doc.map_options().height, "600px");
    }

    #[test]
    fn view_fields_override_flavour() {
        let doc = MapDocument::from_json_str(
            r#"{"flavor": "folium", "center": {"lat": 1.0, "lng": 2.0}, "zoom": 5,
                "options": {"minZoom": 3}}"#,
        )
        .unwrap();
        let o = doc.map_options();
        assert_eq!(o.height, "100%");
        assert_eq!(o.center, LatLng::new(1.0, 2.0));
        assert_eq!(o.zoom, 5.0);
        assert_eq!(o.extra["minZoom"], 3);
    }

    #[test]
    fn apply_reports_each_entry() {
        let doc = MapDocument::from_json_str(
            r#"{
                "basemaps": ["OpenStreetMap", "bogus"],
                "vectors": [
                    {"name": "pts", "data": {"type": "Point", "coordinates": [0, 0]},
                     "hover_style": {"fillColor": "red"}},
                    {"name": "none"}
                ],
                "rasters": [{"name": "dem"}],
                "layer_control": "middle"
            }"#,
        )
        .unwrap();
        let mut map = doc.new_map();
        let report = doc.apply(&mut map);
        let names: Vec<&str> = report.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["OpenStreetMap", "bogus", "pts", "none", "dem", "layer_control"]
        );
        assert!(report[0].1.is_applied());
        assert!(matches!(report[1].1, Outcome::Substituted { .. }));
        assert!(report[2].1.is_applied());
        assert!(matches!(report[3].1.reason(), Some(Error::MissingSource)));
        assert!(matches!(report[4].1.reason(), Some(Error::MissingUrl)));
        assert!(matches!(report[5].1, Outcome::Substituted { .. }));
        assert!(map.layer("pts").unwrap().feature_count() == 1);
    }

    #[test]
    fn invalid_inline_geojson_is_skipped() {
        let doc = MapDocument::from_json_str(
            r#"{"vectors": [{"name": "bad", "data": {"type": "Nope"}}]}"#,
        )
        .unwrap();
        let mut map = doc.new_map();
        let report = doc.apply(&mut map);
        assert!(report[0].1.is_skipped());
        assert!(map.registry().is_empty());
    }
}
