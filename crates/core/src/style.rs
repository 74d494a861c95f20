//! Path style options for vector layers.
//!
//! A style is either a static mapping of Leaflet path options
//! (`color`, `fillColor`, `weight`, ...) or a function computing that mapping
//! per feature.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::vector::Feature;

/// A single style option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::Text(v)
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        StyleValue::Number(v as f64)
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        StyleValue::Bool(v)
    }
}

/// Mapping from style-option name to value.
pub type StyleMap = BTreeMap<String, StyleValue>;

/// Build a [`StyleMap`] from `(key, value)` pairs.
pub fn style_map<K, V, I>(pairs: I) -> StyleMap
where
    K: Into<String>,
    V: Into<StyleValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Per-feature style function.
pub type StyleFn = Arc<dyn Fn(&Feature) -> StyleMap + Send + Sync>;

/// Style of a vector layer: fixed options or computed per feature.
#[derive(Clone)]
pub enum Style {
    Static(StyleMap),
    PerFeature(StyleFn),
}

impl Style {
    /// Wrap a closure as a per-feature style.
    pub fn per_feature<F>(f: F) -> Self
    where
        F: Fn(&Feature) -> StyleMap + Send + Sync + 'static,
    {
        Style::PerFeature(Arc::new(f))
    }

    /// Resolve the options for one feature.
    pub fn resolve(&self, feature: &Feature) -> StyleMap {
        match self {
            Style::Static(map) => map.clone(),
            Style::PerFeature(f) => f(feature),
        }
    }

    pub fn is_per_feature(&self) -> bool {
        matches!(self, Style::PerFeature(_))
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Static(map) => f.debug_tuple("Static").field(map).finish(),
            Style::PerFeature(_) => f.write_str("PerFeature(..)"),
        }
    }
}

impl From<StyleMap> for Style {
    fn from(map: StyleMap) -> Self {
        Style::Static(map)
    }
}

/// Style applied to vector layers when the caller gives none.
pub fn default_style() -> StyleMap {
    style_map([
        ("color", StyleValue::from("black")),
        ("fillColor", StyleValue::from("green")),
        ("opacity", StyleValue::from(0.05)),
        ("weight", StyleValue::from(1.9)),
        ("dashArray", StyleValue::from("2")),
        ("fillOpacity", StyleValue::from(0.6)),
    ])
}

/// Highlight style used by the Folium flavour when none is given.
pub fn default_highlight_style() -> StyleMap {
    style_map([("fillColor", "red")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::AttributeValue;

    #[test]
    fn default_style_keys() {
        let s = default_style();
        assert_eq!(s.get("color"), Some(&StyleValue::Text("black".into())));
        assert_eq!(s.get("weight"), Some(&StyleValue::Number(1.9)));
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn per_feature_resolution() {
        let style = Style::per_feature(|f| {
            let color = match f.get_property("kind") {
                Some(AttributeValue::String(k)) if k == "lake" => "blue",
                _ => "gray",
            };
            style_map([("color", color)])
        });
        let mut lake = Feature::empty();
        lake.set_property("kind", AttributeValue::String("lake".into()));
        assert_eq!(
            style.resolve(&lake).get("color"),
            Some(&StyleValue::Text("blue".into()))
        );
        assert_eq!(
            style.resolve(&Feature::empty()).get("color"),
            Some(&StyleValue::Text("gray".into()))
        );
        assert!(style.is_per_feature());
    }

    #[test]
    fn style_value_serializes_untagged() {
        let json = serde_json::to_string(&style_map([("weight", 2)])).unwrap();
        assert_eq!(json, r#"{"weight":2.0}"#);
    }
}
