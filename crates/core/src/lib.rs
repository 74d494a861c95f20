//! # geoleaf Core
//!
//! Named-layer registry and map front-ends for Leaflet-style interactive maps.
//!
//! This crate provides:
//! - [`Map`]: basemaps, vector and raster layers, and a layer control, in a
//!   Leaflet or Folium flavour
//! - [`BasemapCatalog`]: static table of named XYZ tile providers
//! - [`MapDisplay`] / [`MapCanvas`]: the display seam and its in-memory
//!   implementation, rendered to a standalone HTML page
//! - [`VectorReader`] / [`TileService`]: seams to data sources
//! - [`MapDocument`]: JSON description of a whole map
//!
//! Map operations never fail loudly: every problem is logged through
//! `tracing` and returned as an [`Outcome`].
//!
//! ```
//! use geoleaf_core::{Map, Outcome};
//!
//! let mut map = Map::leaflet();
//! map.add_basemap("OpenStreetMap");
//! let outcome = map.add_basemap("not-a-real-basemap");
//! assert!(matches!(outcome, Outcome::Substituted { .. }));
//! map.add_layer_control("topright");
//! assert!(map.to_html().contains("L.control.layers"));
//! ```

pub mod basemap;
pub mod control;
pub mod display;
pub mod document;
pub mod error;
pub mod geo;
pub mod html;
pub mod layer;
pub mod map;
pub mod registry;
pub mod source;
pub mod style;
pub mod vector;

pub use basemap::{BasemapCatalog, TileSource};
pub use control::{ControlPosition, LayerControl};
pub use display::{ItemId, MapCanvas, MapDisplay, MapOptions};
pub use document::MapDocument;
pub use error::{Error, Result};
pub use geo::{LatLng, LatLngBounds};
pub use layer::{Layer, LayerKind};
pub use map::{Flavor, Map, Outcome, VectorOptions};
pub use source::{LocalReader, RasterRequest, RasterTiles, TileService, VectorReader};
pub use style::{Style, StyleMap, StyleValue};
pub use vector::{AttributeValue, Feature, FeatureCollection};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::map::{Flavor, Map, Outcome, VectorOptions};
    pub use crate::style::{style_map, Style, StyleMap};
    pub use crate::vector::{AttributeValue, Feature, FeatureCollection};
}
