//! Map front-ends: named layer registration with fallbacks.
//!
//! [`Map`] wraps a [`MapDisplay`] and keeps a per-instance registry of named
//! layers plus at most one layer-control reference. Every operation returns
//! an [`Outcome`]; failures are logged with `tracing::warn!` and never raised,
//! so ignoring the outcome is always fine.
//!
//! Two flavours share the same registry and differ only in defaults:
//!
//! | | [`Flavor::Leaflet`] | [`Flavor::Folium`] |
//! |---|---|---|
//! | height | `600px` | `100%` |
//! | fallback basemap | `OpenTopoMap` | `OpenStreetMap` |
//! | remote vectors | attached directly | wrapped in a feature group |
//! | default highlight | none | `fillColor: red` |

use std::path::Path;
use std::sync::Arc;

use geoleaf_colormap::ColorScheme;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::basemap::{BasemapCatalog, TileSource};
use crate::control::{ControlPosition, LayerControl};
use crate::display::{ItemId, MapCanvas, MapDisplay, MapOptions};
use crate::error::{Error, Result};
use crate::geo::LatLng;
use crate::layer::{Layer, RasterData, VectorData};
use crate::registry::LayerRegistry;
use crate::source::{LocalReader, RasterRequest, TileService, VectorReader};
use crate::style::{default_highlight_style, default_style, Style, StyleMap};
use crate::vector::FeatureCollection;

/// Front-end defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Leaflet,
    Folium,
}

impl Flavor {
    /// View options a new map of this flavour starts with.
    pub fn default_options(&self) -> MapOptions {
        match self {
            Flavor::Leaflet => MapOptions::default()
                .with_height("600px")
                .with_option("scrollWheelZoom", true),
            Flavor::Folium => MapOptions::default().with_height("100%"),
        }
    }

    /// Basemap used when a requested name is not in the catalog.
    pub fn default_basemap(&self) -> &'static str {
        match self {
            Flavor::Leaflet => "OpenTopoMap",
            Flavor::Folium => "OpenStreetMap",
        }
    }

    fn groups_remote_vectors(&self) -> bool {
        matches!(self, Flavor::Folium)
    }

    fn default_highlight(&self) -> Option<Style> {
        match self {
            Flavor::Leaflet => None,
            Flavor::Folium => Some(Style::Static(default_highlight_style())),
        }
    }
}

/// Result of a map operation.
#[derive(Debug)]
pub enum Outcome {
    /// Done as requested.
    Applied,
    /// Done with a substitute (fallback basemap, default position).
    Substituted { used: String, reason: Error },
    /// Nothing changed.
    Skipped(Error),
}

impl Outcome {
    /// Done exactly as requested.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    /// Something was added or removed, possibly a substitute.
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::Skipped(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    /// Why the request was not carried out as asked.
    pub fn reason(&self) -> Option<&Error> {
        match self {
            Outcome::Applied => None,
            Outcome::Substituted { reason, .. } | Outcome::Skipped(reason) => Some(reason),
        }
    }
}

/// Where a vector layer's features come from, and how they are drawn.
///
/// Exactly one of `url` and `data` must be set.
#[derive(Debug, Clone, Default)]
pub struct VectorOptions {
    /// URL or local path read through the map's [`VectorReader`].
    pub url: Option<String>,
    /// In-memory features.
    pub data: Option<FeatureCollection>,
    pub style: Option<Style>,
    pub highlight_style: Option<Style>,
    pub point_style: Option<StyleMap>,
}

impl VectorOptions {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_data(data: FeatureCollection) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_highlight_style(mut self, style: impl Into<Style>) -> Self {
        self.highlight_style = Some(style.into());
        self
    }

    pub fn with_point_style(mut self, style: StyleMap) -> Self {
        self.point_style = Some(style);
        self
    }
}

fn skip(op: &'static str, name: &str, reason: Error) -> Outcome {
    warn!(op, layer = name, "{reason}");
    Outcome::Skipped(reason)
}

/// Interactive map with a registry of named layers.
pub struct Map<D: MapDisplay = MapCanvas> {
    flavor: Flavor,
    display: D,
    catalog: BasemapCatalog,
    registry: LayerRegistry,
    control: Option<(ItemId, LayerControl)>,
    reader: Box<dyn VectorReader>,
    tiles: Option<Box<dyn TileService>>,
}

impl Map<MapCanvas> {
    /// Leaflet-flavoured map with default view options.
    pub fn leaflet() -> Self {
        Self::new(Flavor::Leaflet, Flavor::Leaflet.default_options())
    }

    /// Folium-flavoured map with default view options.
    pub fn folium() -> Self {
        Self::new(Flavor::Folium, Flavor::Folium.default_options())
    }

    pub fn new(flavor: Flavor, options: MapOptions) -> Self {
        Self::with_display(flavor, MapCanvas::new(options))
    }

    /// Standalone Leaflet HTML page of the current map.
    pub fn to_html(&self) -> String {
        crate::html::render(&self.display)
    }

    /// Write [`Map::to_html`] to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_html())?;
        debug!(path = %path.as_ref().display(), "map saved");
        Ok(())
    }
}

impl<D: MapDisplay> Map<D> {
    /// Wrap an existing display.
    pub fn with_display(flavor: Flavor, display: D) -> Self {
        Self {
            flavor,
            display,
            catalog: BasemapCatalog::builtin(),
            registry: LayerRegistry::new(),
            control: None,
            reader: Box::new(LocalReader),
            tiles: None,
        }
    }

    /// Use `reader` for vector URLs instead of the local-file reader.
    pub fn with_reader(mut self, reader: impl VectorReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Enable raster layers through `service`.
    pub fn with_tile_service(mut self, service: impl TileService + 'static) -> Self {
        self.tiles = Some(Box::new(service));
        self
    }

    pub fn with_catalog(mut self, catalog: BasemapCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn catalog(&self) -> &BasemapCatalog {
        &self.catalog
    }

    /// Register custom basemaps here before calling [`Map::add_basemap`].
    pub fn catalog_mut(&mut self) -> &mut BasemapCatalog {
        &mut self.catalog
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.registry.get(name).map(|e| e.layer.as_ref())
    }

    /// Registered names, oldest first.
    pub fn layer_names(&self) -> &[String] {
        self.registry.names()
    }

    /// The control added last, if it was not removed.
    pub fn layer_control(&self) -> Option<&LayerControl> {
        self.control.as_ref().map(|(_, c)| c)
    }

    pub fn set_view(&mut self, center: impl Into<LatLng>, zoom: f64) {
        self.display.set_view(center.into(), zoom);
    }

    /// Attach `layer` under its name, detaching any layer it replaces.
    fn put(&mut self, layer: Layer) {
        let layer = Arc::new(layer);
        if let Some(old) = self.registry.remove(&layer.name) {
            self.display.detach_layer(old.item);
            debug!(layer = %layer.name, "replacing registered layer");
        }
        let item = self.display.attach_layer(Arc::clone(&layer));
        self.registry.insert(item, layer);
    }

    // ─── Basemaps ───────────────────────────────────────────────────────

    /// Add a catalog basemap, falling back to the flavour's default.
    pub fn add_basemap(&mut self, name: &str) -> Outcome {
        let fallback = self.flavor.default_basemap();
        self.add_basemap_or(name, fallback)
    }

    /// Add a catalog basemap, falling back to `fallback` if `name` is unknown.
    pub fn add_basemap_or(&mut self, name: &str, fallback: &str) -> Outcome {
        let reason = match self.catalog.lookup(name).cloned() {
            Ok(tiles) => {
                self.put(Layer::basemap(name, tiles));
                return Outcome::Applied;
            }
            Err(reason) => reason,
        };

        warn!(basemap = name, fallback, "basemap not found, using fallback");
        match self.catalog.lookup(fallback).cloned() {
            Ok(tiles) => {
                self.put(Layer::basemap(fallback, tiles));
                Outcome::Substituted {
                    used: fallback.to_string(),
                    reason,
                }
            }
            Err(e) => skip("add_basemap", fallback, e),
        }
    }

    /// Add a tile layer that is not in the catalog.
    pub fn add_tile_layer(&mut self, name: &str, tiles: TileSource) -> Outcome {
        self.put(Layer::basemap(name, tiles));
        Outcome::Applied
    }

    /// Remove a named layer. Unknown names are a logged no-op.
    pub fn remove_basemap(&mut self, name: &str) -> Outcome {
        self.remove_layer(name)
    }

    /// Remove any named layer. Unknown names are a logged no-op.
    pub fn remove_layer(&mut self, name: &str) -> Outcome {
        match self.registry.remove(name) {
            Some(entry) => {
                self.display.detach_layer(entry.item);
                Outcome::Applied
            }
            None => skip("remove_layer", name, Error::LayerNotFound(name.to_string())),
        }
    }

    /// Show or hide a named layer.
    pub fn set_visibility(&mut self, name: &str, visible: bool) -> Outcome {
        let Some(entry) = self.registry.get_mut(name) else {
            return skip("set_visibility", name, Error::LayerNotFound(name.to_string()));
        };
        let mut layer = (*entry.layer).clone();
        layer.visible = visible;
        entry.layer = Arc::new(layer);
        self.display.replace_layer(entry.item, Arc::clone(&entry.layer));
        Outcome::Applied
    }

    // ─── Layer control ──────────────────────────────────────────────────

    /// Add a layer control at a corner given by name.
    ///
    /// Anything other than the four corners logs a warning and uses the
    /// top-right corner.
    pub fn add_layer_control(&mut self, position: &str) -> Outcome {
        match position.parse::<ControlPosition>() {
            Ok(p) => self.add_layer_control_at(p),
            Err(reason) => {
                warn!(position, "position not valid, using topright");
                self.attach_control(ControlPosition::TopRight);
                Outcome::Substituted {
                    used: ControlPosition::TopRight.to_string(),
                    reason,
                }
            }
        }
    }

    pub fn add_layer_control_at(&mut self, position: ControlPosition) -> Outcome {
        self.attach_control(position);
        Outcome::Applied
    }

    fn attach_control(&mut self, position: ControlPosition) {
        let control = LayerControl::new(position);
        let item = self.display.attach_control(control);
        // The previous control is only forgotten, not detached.
        if let Some((old, _)) = self.control.replace((item, control)) {
            debug!(?old, "previous layer control left on the display");
        }
    }

    /// Remove the current layer control. Logs and no-ops if there is none.
    pub fn remove_layer_control(&mut self) -> Outcome {
        match self.control.take() {
            Some((item, _)) => {
                self.display.detach_control(item);
                Outcome::Applied
            }
            None => skip("remove_layer_control", "", Error::NoLayerControl),
        }
    }

    // ─── Vector layers ──────────────────────────────────────────────────

    /// Add a vector layer from a URL/path or from in-memory features.
    ///
    /// Giving both or neither source, or a source that fails to load, logs a
    /// warning and leaves the map unchanged.
    pub fn add_vector(&mut self, name: &str, options: VectorOptions) -> Outcome {
        let VectorOptions {
            url,
            data,
            style,
            highlight_style,
            point_style,
        } = options;

        let (features, remote) = match (url, data) {
            (Some(_), Some(_)) => return skip("add_vector", name, Error::ConflictingSources),
            (None, None) => return skip("add_vector", name, Error::MissingSource),
            (None, Some(data)) => (data, false),
            (Some(url), None) => match self.reader.read_features(&url) {
                Ok(features) => (features, true),
                Err(e) => return skip("add_vector", name, e),
            },
        };

        debug!(layer = name, features = features.len(), "vector layer loaded");
        let data = VectorData {
            features,
            style: style.unwrap_or_else(|| Style::Static(default_style())),
            highlight_style: highlight_style.or_else(|| self.flavor.default_highlight()),
            point_style,
        };
        let grouped = remote && self.flavor.groups_remote_vectors();
        self.put(Layer::vector(name, data).grouped(grouped));
        Outcome::Applied
    }

    // ─── Raster layers ──────────────────────────────────────────────────

    /// Add a raster layer served as tiles by the configured [`TileService`].
    ///
    /// The layer is wrapped in a feature group named `name`. A missing URL,
    /// unknown colormap, missing tile service or service failure logs a
    /// warning and leaves the map unchanged.
    pub fn add_raster(
        &mut self,
        url: Option<&str>,
        name: &str,
        colormap: Option<&str>,
        opacity: f32,
    ) -> Outcome {
        let Some(url) = url else {
            return skip("add_raster", name, Error::MissingUrl);
        };
        let colormap = match colormap.map(str::parse::<ColorScheme>).transpose() {
            Ok(c) => c,
            Err(e) => return skip("add_raster", name, Error::UnknownColormap(e.0)),
        };

        let request = RasterRequest {
            location: url,
            colormap,
        };
        let served = match self.tiles.as_deref() {
            Some(service) => service.raster_tiles(&request),
            None => Err(Error::NoTileService),
        };
        match served {
            Ok(raster) => {
                let data = RasterData {
                    tiles: raster.tiles,
                    bounds: raster.bounds,
                    colormap,
                };
                self.put(Layer::raster(name, data).with_opacity(opacity).grouped(true));
                Outcome::Applied
            }
            Err(e) => skip("add_raster", name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerKind;

    #[test]
    fn flavour_defaults() {
        let leaf = Map::leaflet();
        assert_eq!(leaf.display().options().height, "600px");
        assert_eq!(leaf.display().options().extra["scrollWheelZoom"], true);
        let folium = Map::folium();
        assert_eq!(folium.display().options().height, "100%");
        assert_eq!(folium.display().options().zoom, 2.0);
        assert_eq!(folium.display().options().center, LatLng::ORIGIN);
    }

    #[test]
    fn add_known_basemap() {
        let mut m = Map::leaflet();
        assert!(m.add_basemap("CartoDB.Positron").is_applied());
        let layer = m.layer("CartoDB.Positron").unwrap();
        assert_eq!(layer.kind, LayerKind::Basemap);
        assert_eq!(m.display().layer_count(), 1);
    }

    #[test]
    fn unknown_basemap_falls_back_per_flavour() {
        let mut leaf = Map::leaflet();
        match leaf.add_basemap("nope") {
            Outcome::Substituted { used, reason } => {
                assert_eq!(used, "OpenTopoMap");
                assert!(matches!(reason, Error::UnknownBasemap(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(leaf.layer("OpenTopoMap").is_some());
        assert!(leaf.layer("nope").is_none());

        let mut folium = Map::folium();
        assert!(folium.add_basemap("nope").changed());
        assert!(folium.layer("OpenStreetMap").is_some());
    }

    #[test]
    fn bad_fallback_skips() {
        let mut m = Map::leaflet();
        let outcome = m.add_basemap_or("nope", "also-nope");
        assert!(outcome.is_skipped());
        assert!(m.registry().is_empty());
        assert_eq!(m.display().layer_count(), 0);
    }

    #[test]
    fn custom_tile_layer_and_catalog_entry() {
        let mut m = Map::folium();
        m.catalog_mut()
            .register("Local", TileSource::new("http://localhost/{z}/{x}/{y}.png", "", 22));
        assert!(m.add_basemap("Local").is_applied());
        assert!(m
            .add_tile_layer("Other", TileSource::new("http://o/{z}/{x}/{y}.png", "", 18))
            .is_applied());
        assert_eq!(m.layer_names(), ["Local".to_string(), "Other".to_string()]);
    }

    #[test]
    fn visibility_toggle() {
        let mut m = Map::leaflet();
        m.add_basemap("OpenStreetMap");
        assert!(m.set_visibility("OpenStreetMap", false).is_applied());
        assert!(!m.layer("OpenStreetMap").unwrap().visible);
        assert!(!m.display().layers().next().unwrap().visible);
        assert!(m.set_visibility("ghost", true).is_skipped());
    }

    #[test]
    fn raster_without_service_is_skipped() {
        let mut m = Map::leaflet();
        let outcome = m.add_raster(Some("https://example.com/dem.tif"), "dem", None, 1.0);
        assert!(matches!(outcome.reason(), Some(Error::NoTileService)));
        let outcome = m.add_raster(None, "dem", None, 1.0);
        assert!(matches!(outcome.reason(), Some(Error::MissingUrl)));
        assert!(m.registry().is_empty());
    }

    #[test]
    fn set_view_moves_display() {
        let mut m = Map::folium();
        m.set_view((45.0, 7.0), 9.0);
        assert_eq!(m.display().options().center, LatLng::new(45.0, 7.0));
        assert_eq!(m.display().options().zoom, 9.0);
    }
}
