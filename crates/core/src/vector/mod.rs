//! Vector data structures and GeoJSON conversion.
//!
//! A [`FeatureCollection`] is the in-memory tabular form of a vector layer:
//! one geometry column plus attribute columns per feature.

use std::collections::BTreeMap;
use std::str::FromStr;

use geo_types::Geometry;
use geojson::{feature::Id, GeoJson, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => AttributeValue::Null,
            JsonValue::Bool(b) => AttributeValue::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Int(i),
                None => AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => AttributeValue::String(s.clone()),
            // Nested arrays/objects are kept as their JSON text.
            other => AttributeValue::String(other.to_string()),
        }
    }

    fn to_json(&self) -> JsonValue {
        match self {
            AttributeValue::Null => JsonValue::Null,
            AttributeValue::Bool(b) => JsonValue::Bool(*b),
            AttributeValue::Int(i) => JsonValue::from(*i),
            AttributeValue::Float(f) => JsonValue::from(*f),
            AttributeValue::String(s) => JsonValue::String(s.clone()),
        }
    }
}

/// A geographic feature with geometry and attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature geometry
    pub geometry: Option<Geometry<f64>>,
    /// Feature attributes
    pub properties: BTreeMap<String, AttributeValue>,
    /// Optional feature ID
    pub id: Option<String>,
}

impl Feature {
    /// Create a new feature with geometry
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self {
            geometry: Some(geometry),
            properties: BTreeMap::new(),
            id: None,
        }
    }

    /// Create a feature with no geometry
    pub fn empty() -> Self {
        Self {
            geometry: None,
            properties: BTreeMap::new(),
            id: None,
        }
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.properties.insert(key.into(), value);
    }

    /// Builder form of [`Feature::set_property`].
    pub fn with_property(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.set_property(key, value);
        self
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }

    fn from_geojson(feature: geojson::Feature) -> Result<Self> {
        let geometry = match feature.geometry {
            Some(g) => Some(Geometry::<f64>::try_from(g)?),
            None => None,
        };
        let properties = feature
            .properties
            .unwrap_or_default()
            .iter()
            .map(|(k, v)| (k.clone(), AttributeValue::from_json(v)))
            .collect();
        let id = feature.id.map(|id| match id {
            Id::String(s) => s,
            Id::Number(n) => n.to_string(),
        });
        Ok(Self {
            geometry,
            properties,
            id,
        })
    }

    /// Convert to a GeoJSON feature, merging `extra` into the properties.
    pub fn to_geojson(&self, extra: Option<(&str, JsonValue)>) -> geojson::Feature {
        let mut properties: JsonObject = self
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        if let Some((key, value)) = extra {
            properties.insert(key.to_string(), value);
        }
        geojson::Feature {
            bbox: None,
            geometry: self
                .geometry
                .as_ref()
                .map(|g| geojson::Geometry::new(geojson::Value::from(g))),
            id: self.id.clone().map(Id::String),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Collection of features
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self { features: Vec::new() }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Build from any GeoJSON document.
    ///
    /// A bare geometry or single feature becomes a one-element collection.
    pub fn from_geojson(doc: GeoJson) -> Result<Self> {
        let features = match doc {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(g) => vec![geojson::Feature {
                bbox: None,
                geometry: Some(g),
                id: None,
                properties: None,
                foreign_members: None,
            }],
        };
        let features = features
            .into_iter()
            .map(Feature::from_geojson)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { features })
    }

    /// Parse GeoJSON text.
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        Self::from_geojson(GeoJson::from_str(text)?)
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{point, Point};

    const COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": 7,
             "properties": {"name": "Atlantis", "pop": 12, "area": 3.5, "tags": ["a"]},
             "geometry": {"type": "Point", "coordinates": [10.0, 20.0]}},
            {"type": "Feature", "properties": null, "geometry": null}
        ]
    }"#;

    #[test]
    fn parse_feature_collection() {
        let fc = FeatureCollection::from_geojson_str(COUNTRIES).unwrap();
        assert_eq!(fc.len(), 2);
        let first = &fc.features[0];
        assert_eq!(first.id.as_deref(), Some("7"));
        assert_eq!(
            first.get_property("name"),
            Some(&AttributeValue::String("Atlantis".into()))
        );
        assert_eq!(first.get_property("pop"), Some(&AttributeValue::Int(12)));
        assert_eq!(first.get_property("area"), Some(&AttributeValue::Float(3.5)));
        assert_eq!(
            first.get_property("tags"),
            Some(&AttributeValue::String(r#"["a"]"#.into()))
        );
        assert_eq!(
            first.geometry,
            Some(Geometry::Point(Point::new(10.0, 20.0)))
        );
        assert!(fc.features[1].geometry.is_none());
    }

    #[test]
    fn bare_geometry_is_single_feature() {
        let fc = FeatureCollection::from_geojson_str(
            r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#,
        )
        .unwrap();
        assert_eq!(fc.len(), 1);
        assert!(fc.features[0].properties.is_empty());
    }

    #[test]
    fn invalid_text_is_an_error() {
        assert!(FeatureCollection::from_geojson_str("not json").is_err());
    }

    #[test]
    fn to_geojson_merges_extra_property() {
        let f = Feature::new(Geometry::Point(point!(x: 1.0, y: 2.0)))
            .with_property("name", AttributeValue::String("x".into()));
        let gj = f.to_geojson(Some(("__style", serde_json::json!({"color": "red"}))));
        let props = gj.properties.unwrap();
        assert_eq!(props["name"], "x");
        assert_eq!(props["__style"]["color"], "red");
        assert!(gj.geometry.is_some());
    }
}
