//! Tests against public endpoints and a local tile server.
//!
//! Tests marked `#[ignore]` need network access.
//! Run with: `cargo test -p geoleaf-cloud -- --ignored`

use std::time::Duration;

use geoleaf_cloud::{GeoJsonReader, HttpOptions, TileClient, TileEndpoint};
use geoleaf_core::prelude::*;

const COUNTRIES: &str =
    "https://raw.githubusercontent.com/giswqs/leafmap/master/examples/data/countries.geojson";

fn options() -> HttpOptions {
    HttpOptions::default().with_timeout(Duration::from_secs(30))
}

#[test]
fn unreachable_url_leaves_map_unchanged() {
    let reader = GeoJsonReader::new(HttpOptions::default().with_timeout(Duration::from_secs(5)))
        .expect("client");
    let mut map = Map::folium().with_reader(reader);
    map.add_basemap("OpenStreetMap");

    let outcome = map.add_vector(
        "countries",
        VectorOptions::from_url("http://127.0.0.1:9/countries.geojson"),
    );
    assert!(matches!(outcome.reason(), Some(Error::Fetch { .. })));
    assert_eq!(map.layer_names(), ["OpenStreetMap".to_string()]);
    assert_eq!(map.display().layer_count(), 1);
}

#[test]
#[ignore]
fn remote_countries_are_loaded_and_grouped() {
    let reader = GeoJsonReader::new(options()).expect("client");
    let mut map = Map::folium().with_reader(reader);
    let outcome = map.add_vector("countries", VectorOptions::from_url(COUNTRIES));
    assert!(outcome.is_applied(), "{outcome:?}");
    let layer = map.layer("countries").unwrap();
    assert!(layer.feature_count() > 100);
    assert!(layer.grouped);
}

/// Needs a TiTiler instance on the default endpoint.
#[test]
#[ignore]
fn raster_via_local_titiler() {
    let dem = "https://copernicus-dem-30m.s3.amazonaws.com/Copernicus_DSM_COG_10_N00_00_W080_00_DEM/Copernicus_DSM_COG_10_N00_00_W080_00_DEM.tif";
    let tiles = TileClient::new(TileEndpoint::default(), options()).expect("client");
    let mut map = Map::leaflet().with_tile_service(tiles);
    let outcome = map.add_raster(Some(dem), "dem", Some("terrain"), 0.8);
    assert!(outcome.is_applied(), "{outcome:?}");
    assert!(map.to_html().contains("colormap_name=terrain"));
}
