//! Standalone Leaflet HTML rendering of a [`MapCanvas`].
//!
//! Each attached layer becomes one Leaflet layer variable. Per-feature style
//! functions are evaluated here and embedded in each feature's properties,
//! so the page needs no Rust at view time.

use geoleaf_colormap::{legend_html, LegendParams};
use serde_json::{json, Value};

use crate::display::{DisplayItem, MapCanvas};
use crate::layer::{Layer, LayerBody, LayerKind, VectorData};

const LEAFLET_VERSION: &str = "1.9.4";

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<link rel="stylesheet" href="https://unpkg.com/leaflet@__LEAFLET__/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@__LEAFLET__/dist/leaflet.js"></script>
<style>
html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
#map { width: 100%; height: __HEIGHT__; }
.geoleaf-legend { background: white; padding: 6px 8px; border-radius: 4px; font: 12px sans-serif; }
.geoleaf-legend-bar { width: 160px; height: 10px; margin-top: 4px; }
</style>
</head>
<body>
<div id="map"></div>
<script>
__SCRIPT__
</script>
</body>
</html>
"#;

/// JSON literal safe to inline inside a `<script>` element.
fn js(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn css_height(height: &str) -> String {
    height
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '%' | '.' | '-'))
        .collect()
}

fn vector_geojson(data: &VectorData) -> Value {
    let features: Vec<Value> = data
        .features
        .iter()
        .map(|f| {
            let mut props = serde_json::Map::new();
            props.insert("__style".into(), json!(data.style.resolve(f)));
            if let Some(h) = &data.highlight_style {
                props.insert("__highlight".into(), json!(h.resolve(f)));
            }
            let mut feature = serde_json::to_value(f.to_geojson(None)).unwrap_or(Value::Null);
            if let Some(obj) = feature.get_mut("properties").and_then(Value::as_object_mut) {
                obj.extend(props);
            }
            feature
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

/// Emit the layer's definition; returns the variable to add to the map.
fn layer_script(var: &str, layer: &Layer, out: &mut String) -> String {
    match &layer.body {
        LayerBody::Tiles(tiles) => {
            let opts = json!({
                "attribution": tiles.attribution,
                "maxZoom": tiles.max_zoom,
                "opacity": layer.opacity,
            });
            out.push_str(&format!(
                "var {var} = L.tileLayer({}, {});\n",
                js(&json!(tiles.url)),
                js(&opts)
            ));
        }
        LayerBody::Raster(raster) => {
            let mut opts = json!({
                "attribution": raster.tiles.attribution,
                "maxZoom": raster.tiles.max_zoom,
                "opacity": layer.opacity,
            });
            if let Some(b) = raster.bounds {
                opts["bounds"] = json!(b.to_array());
            }
            out.push_str(&format!(
                "var {var} = L.tileLayer({}, {});\n",
                js(&json!(raster.tiles.url)),
                js(&opts)
            ));
            if let Some(scheme) = raster.colormap {
                let legend = legend_html(&LegendParams::new(scheme, &layer.name));
                out.push_str(&format!(
                    "var {var}_legend = L.control({{position: \"bottomright\"}});\n\
                     {var}_legend.onAdd = function () {{ var d = L.DomUtil.create(\"div\"); d.innerHTML = {}; return d; }};\n",
                    js(&json!(legend))
                ));
            }
        }
        LayerBody::Vector(data) => {
            let point = data
                .point_style
                .as_ref()
                .map(|p| json!(p))
                .unwrap_or_else(|| json!({ "radius": 5 }));
            out.push_str(&format!(
                "var {var} = L.geoJSON({}, {{\n\
                 \x20 style: function (f) {{ return f.properties.__style; }},\n\
                 \x20 pointToLayer: function (f, ll) {{ return L.circleMarker(ll, {}); }},\n\
                 \x20 onEachFeature: function (f, l) {{\n\
                 \x20   var h = f.properties.__highlight;\n\
                 \x20   if (h) {{\n\
                 \x20     l.on(\"mouseover\", function () {{ l.setStyle(h); }});\n\
                 \x20     l.on(\"mouseout\", function () {{ {var}.resetStyle(l); }});\n\
                 \x20   }}\n\
                 \x20 }}\n\
                 }});\n",
                js(&vector_geojson(data)),
                js(&point)
            ));
        }
    }
    if layer.grouped {
        out.push_str(&format!("var {var}_group = L.featureGroup([{var}]);\n"));
        format!("{var}_group")
    } else {
        var.to_string()
    }
}

/// Render the canvas as a complete HTML document.
pub fn render(canvas: &MapCanvas) -> String {
    let options = canvas.options();
    let mut map_opts = options.extra.clone();
    map_opts.insert("center".into(), json!(options.center.to_array()));
    map_opts.insert("zoom".into(), json!(options.zoom));

    let mut script = format!(
        "var map = L.map(\"map\", {});\nvar baseLayers = {{}};\nvar overlays = {{}};\n",
        js(&Value::Object(map_opts))
    );

    let mut controls = Vec::new();
    for (n, (_, item)) in canvas.items().enumerate() {
        match item {
            DisplayItem::Layer(layer) => {
                let var = format!("layer_{n}");
                let handle = layer_script(&var, layer, &mut script);
                let bucket = match layer.kind {
                    LayerKind::Basemap => "baseLayers",
                    LayerKind::Vector | LayerKind::Raster => "overlays",
                };
                script.push_str(&format!("{bucket}[{}] = {handle};\n", js(&json!(layer.name))));
                if layer.visible {
                    script.push_str(&format!("{handle}.addTo(map);\n"));
                    if matches!(&layer.body, LayerBody::Raster(r) if r.colormap.is_some()) {
                        script.push_str(&format!("{var}_legend.addTo(map);\n"));
                    }
                }
            }
            DisplayItem::Control(control) => controls.push(*control),
        }
    }

    // Controls list every layer, so they go in after all layers exist.
    for control in controls {
        let opts = json!({
            "position": control.position.as_str(),
            "collapsed": control.collapsed,
        });
        script.push_str(&format!(
            "L.control.layers(baseLayers, overlays, {}).addTo(map);\n",
            js(&opts)
        ));
    }

    PAGE.replace("__LEAFLET__", LEAFLET_VERSION)
        .replace("__HEIGHT__", &css_height(&options.height))
        .replace("__SCRIPT__", &script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basemap::TileSource;
    use crate::control::{ControlPosition, LayerControl};
    use crate::display::{MapDisplay, MapOptions};
    use crate::style::{style_map, Style};
    use crate::vector::{AttributeValue, Feature, FeatureCollection};
    use geo_types::{point, Geometry};
    use std::sync::Arc;

    #[test]
    fn renders_view_and_tiles() {
        let mut canvas = MapCanvas::new(MapOptions::default().with_height("600px"));
        canvas.attach_layer(Arc::new(Layer::basemap(
            "OSM",
            TileSource::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png", "osm", 19),
        )));
        canvas.attach_control(LayerControl::new(ControlPosition::BottomLeft));
        let html = render(&canvas);
        assert!(html.contains("height: 600px"));
        assert!(html.contains(r#""center":[0.0,0.0]"#));
        assert!(html.contains("L.tileLayer(\"https://tile.openstreetmap.org/{z}/{x}/{y}.png\""));
        assert!(html.contains("baseLayers[\"OSM\"] = layer_0;"));
        assert!(html.contains(r#""position":"bottomleft""#));
        let tile_at = html.find("layer_0.addTo(map)").unwrap();
        let control_at = html.find("L.control.layers").unwrap();
        assert!(tile_at < control_at);
    }

    #[test]
    fn per_feature_style_is_embedded() {
        let features: FeatureCollection = [
            Feature::new(Geometry::Point(point!(x: 1.0, y: 2.0)))
                .with_property("kind", AttributeValue::String("lake".into())),
            Feature::new(Geometry::Point(point!(x: 3.0, y: 4.0))),
        ]
        .into_iter()
        .collect();
        let style = Style::per_feature(|f| {
            if f.get_property("kind").is_some() {
                style_map([("color", "blue")])
            } else {
                style_map([("color", "gray")])
            }
        });
        let data = VectorData {
            features,
            style,
            highlight_style: None,
            point_style: None,
        };
        let gj = vector_geojson(&data);
        assert_eq!(gj["features"][0]["properties"]["__style"]["color"], "blue");
        assert_eq!(gj["features"][1]["properties"]["__style"]["color"], "gray");
        assert!(gj["features"][0]["properties"].get("__highlight").is_none());
    }

    #[test]
    fn grouped_layers_get_a_group_variable() {
        let mut canvas = MapCanvas::default();
        let layer = Layer::basemap("OSM", TileSource::new("t", "", 19)).grouped(true);
        canvas.attach_layer(Arc::new(layer));
        let html = render(&canvas);
        assert!(html.contains("var layer_0_group = L.featureGroup([layer_0]);"));
        assert!(html.contains("layer_0_group.addTo(map);"));
    }

    #[test]
    fn hidden_layers_are_not_added() {
        let mut canvas = MapCanvas::default();
        let mut layer = Layer::basemap("OSM", TileSource::new("t", "", 19));
        layer.visible = false;
        canvas.attach_layer(Arc::new(layer));
        let html = render(&canvas);
        assert!(html.contains("var layer_0"));
        assert!(!html.contains("layer_0.addTo(map)"));
    }

    #[test]
    fn script_close_tags_are_escaped() {
        let mut canvas = MapCanvas::default();
        canvas.attach_layer(Arc::new(Layer::basemap(
            "</script><b>",
            TileSource::new("t", "", 19),
        )));
        let html = render(&canvas);
        assert!(!html.contains("</script><b>"));
        assert_eq!(css_height("100%; color: red"), "100%colorred");
    }
}
