//! Named-layer registry: at most one layer per name, last write wins.

use std::collections::HashMap;
use std::sync::Arc;

use crate::display::ItemId;
use crate::layer::{Layer, LayerKind};

/// A registered layer and its handle on the display.
#[derive(Debug, Clone)]
pub struct Entry {
    pub item: ItemId,
    pub layer: Arc<Layer>,
}

/// Mapping from layer name to the attached layer.
#[derive(Debug, Default, Clone)]
pub struct LayerRegistry {
    entries: HashMap<String, Entry>,
    /// Registration order (oldest first).
    order: Vec<String>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `layer` under its name. Returns the entry it replaced.
    pub fn insert(&mut self, item: ItemId, layer: Arc<Layer>) -> Option<Entry> {
        let name = layer.name.clone();
        let previous = self.entries.insert(name.clone(), Entry { item, layer });
        if previous.is_some() {
            self.order.retain(|n| *n != name);
        }
        self.order.push(name);
        previous
    }

    pub fn remove(&mut self, name: &str) -> Option<Entry> {
        let entry = self.entries.remove(name)?;
        self.order.retain(|n| n != name);
        Some(entry)
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Names of layers of one kind, in registration order.
    pub fn names_of(&self, kind: LayerKind) -> Vec<&str> {
        self.order
            .iter()
            .filter(|n| self.entries.get(*n).is_some_and(|e| e.layer.kind == kind))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basemap::TileSource;

    fn layer(name: &str) -> Arc<Layer> {
        Arc::new(Layer::basemap(name, TileSource::new("t", "", 19)))
    }

    #[test]
    fn insert_overwrites_and_moves_to_top() {
        let mut reg = LayerRegistry::new();
        assert!(reg.insert(ItemId(1), layer("a")).is_none());
        reg.insert(ItemId(2), layer("b"));
        let old = reg.insert(ItemId(3), layer("a")).unwrap();
        assert_eq!(old.item, ItemId(1));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.names(), ["b".to_string(), "a".to_string()]);
        assert_eq!(reg.get("a").unwrap().item, ItemId(3));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut reg = LayerRegistry::new();
        reg.insert(ItemId(1), layer("a"));
        assert!(reg.remove("a").is_some());
        assert!(reg.remove("a").is_none());
        assert!(reg.is_empty());
        assert!(reg.names().is_empty());
    }

    #[test]
    fn names_by_kind() {
        let mut reg = LayerRegistry::new();
        reg.insert(ItemId(1), layer("a"));
        assert_eq!(reg.names_of(LayerKind::Basemap), vec!["a"]);
        assert!(reg.names_of(LayerKind::Vector).is_empty());
    }
}
