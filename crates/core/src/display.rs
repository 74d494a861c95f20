//! Map display surface.
//!
//! [`MapDisplay`] is the seam to whatever actually draws the map. The
//! registry only attaches and detaches items through it. [`MapCanvas`] is
//! the in-process implementation: it keeps the ordered item list and is what
//! the HTML renderer reads.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::control::LayerControl;
use crate::geo::LatLng;
use crate::layer::Layer;

/// Handle of an item attached to a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u64);

/// Something that can show layers and controls.
pub trait MapDisplay {
    /// Attach a layer on top of the current stack.
    fn attach_layer(&mut self, layer: Arc<Layer>) -> ItemId;

    /// Detach a layer. Returns `None` if `id` is not an attached layer.
    fn detach_layer(&mut self, id: ItemId) -> Option<Arc<Layer>>;

    /// Swap the layer behind `id` in place, keeping its draw position.
    fn replace_layer(&mut self, id: ItemId, layer: Arc<Layer>) -> bool;

    fn attach_control(&mut self, control: LayerControl) -> ItemId;

    fn detach_control(&mut self, id: ItemId) -> bool;

    fn set_view(&mut self, center: LatLng, zoom: f64);
}

/// Construction parameters of a map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: f64,
    /// CSS height of the map element (`"600px"`, `"100%"`).
    pub height: String,
    /// Extra Leaflet map options, forwarded verbatim.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: LatLng::ORIGIN,
            zoom: 2.0,
            height: "600px".to_string(),
            extra: serde_json::Map::new(),
        }
    }
}

impl MapOptions {
    pub fn with_center(mut self, center: impl Into<LatLng>) -> Self {
        self.center = center.into();
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = height.into();
        self
    }

    /// Set one extra Leaflet option.
    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Item attached to a [`MapCanvas`].
#[derive(Debug, Clone)]
pub enum DisplayItem {
    Layer(Arc<Layer>),
    Control(LayerControl),
}

/// In-memory display: view options plus attached items in draw order.
#[derive(Debug, Clone)]
pub struct MapCanvas {
    options: MapOptions,
    items: Vec<(ItemId, DisplayItem)>,
    next_id: u64,
}

impl Default for MapCanvas {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}

impl MapCanvas {
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut MapOptions {
        &mut self.options
    }

    /// All items in draw order (bottom first).
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &DisplayItem)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// Attached layers in draw order.
    pub fn layers(&self) -> impl Iterator<Item = &Arc<Layer>> {
        self.items.iter().filter_map(|(_, item)| match item {
            DisplayItem::Layer(l) => Some(l),
            DisplayItem::Control(_) => None,
        })
    }

    /// Attached controls in attach order.
    pub fn controls(&self) -> impl Iterator<Item = &LayerControl> {
        self.items.iter().filter_map(|(_, item)| match item {
            DisplayItem::Control(c) => Some(c),
            DisplayItem::Layer(_) => None,
        })
    }

    pub fn layer_count(&self) -> usize {
        self.layers().count()
    }

    pub fn control_count(&self) -> usize {
        self.controls().count()
    }

    fn push(&mut self, item: DisplayItem) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push((id, item));
        id
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|(i, _)| *i == id)
    }
}

impl MapDisplay for MapCanvas {
    fn attach_layer(&mut self, layer: Arc<Layer>) -> ItemId {
        debug!(layer = %layer.name, kind = %layer.kind, "attach layer");
        self.push(DisplayItem::Layer(layer))
    }

    fn detach_layer(&mut self, id: ItemId) -> Option<Arc<Layer>> {
        let idx = self.position(id)?;
        if !matches!(self.items[idx].1, DisplayItem::Layer(_)) {
            return None;
        }
        match self.items.remove(idx).1 {
            DisplayItem::Layer(layer) => {
                debug!(layer = %layer.name, "detach layer");
                Some(layer)
            }
            DisplayItem::Control(_) => None,
        }
    }

    fn replace_layer(&mut self, id: ItemId, layer: Arc<Layer>) -> bool {
        match self.position(id) {
            Some(idx) if matches!(self.items[idx].1, DisplayItem::Layer(_)) => {
                self.items[idx].1 = DisplayItem::Layer(layer);
                true
            }
            _ => false,
        }
    }

    fn attach_control(&mut self, control: LayerControl) -> ItemId {
        debug!(position = %control.position, "attach layer control");
        self.push(DisplayItem::Control(control))
    }

    fn detach_control(&mut self, id: ItemId) -> bool {
        match self.position(id) {
            Some(idx) if matches!(self.items[idx].1, DisplayItem::Control(_)) => {
                self.items.remove(idx);
                true
            }
            _ => false,
        }
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.options.center = center;
        self.options.zoom = zoom;
    }
}
