//! Basemap catalog: named XYZ tile providers.
//!
//! Names follow the leaflet-providers convention (`Provider.Variant`) with a
//! few Folium-style aliases. The catalog is a plain lookup table built once
//! from [`PROVIDERS`]; a miss is a "not found", never a panic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An XYZ tile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSource {
    /// URL template with `{z}`, `{x}`, `{y}` and optional `{s}`, `{r}`.
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl TileSource {
    pub fn new(url: impl Into<String>, attribution: impl Into<String>, max_zoom: u8) -> Self {
        Self {
            url: url.into(),
            attribution: attribution.into(),
            max_zoom,
        }
    }

    /// Concrete URL of one tile (first subdomain, no retina suffix).
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url
            .replace("{s}", "a")
            .replace("{r}", "")
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Static description of a catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct Provider {
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
}

impl Provider {
    pub fn to_source(&self) -> TileSource {
        TileSource::new(self.url, self.attribution, self.max_zoom)
    }
}

const OSM_ATTR: &str = "&copy; OpenStreetMap contributors";
const CARTO_ATTR: &str = "&copy; OpenStreetMap contributors &copy; CARTO";
const ESRI_ATTR: &str = "Tiles &copy; Esri";
const STADIA_ATTR: &str = "&copy; Stadia Maps &copy; Stamen Design &copy; OpenStreetMap contributors";

// ─── Provider table ────────────────────────────────────────────────────

pub const PROVIDERS: &[Provider] = &[
    Provider {
        name: "OpenStreetMap.Mapnik",
        url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: OSM_ATTR,
        max_zoom: 19,
    },
    Provider {
        name: "OpenStreetMap.DE",
        url: "https://tile.openstreetmap.de/{z}/{x}/{y}.png",
        attribution: OSM_ATTR,
        max_zoom: 18,
    },
    Provider {
        name: "OpenStreetMap.France",
        url: "https://{s}.tile.openstreetmap.fr/osmfr/{z}/{x}/{y}.png",
        attribution: "&copy; OpenStreetMap France | &copy; OpenStreetMap contributors",
        max_zoom: 20,
    },
    Provider {
        name: "OpenStreetMap.HOT",
        url: "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png",
        attribution: "&copy; OpenStreetMap contributors, Humanitarian OpenStreetMap Team",
        max_zoom: 19,
    },
    Provider {
        name: "OpenStreetMap.CH",
        url: "https://tile.osm.ch/switzerland/{z}/{x}/{y}.png",
        attribution: OSM_ATTR,
        max_zoom: 18,
    },
    Provider {
        name: "OpenTopoMap",
        url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "Map data: &copy; OpenStreetMap contributors, SRTM | Map style: &copy; OpenTopoMap (CC-BY-SA)",
        max_zoom: 17,
    },
    Provider {
        name: "CartoDB.Positron",
        url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        attribution: CARTO_ATTR,
        max_zoom: 20,
    },
    Provider {
        name: "CartoDB.DarkMatter",
        url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        attribution: CARTO_ATTR,
        max_zoom: 20,
    },
    Provider {
        name: "CartoDB.Voyager",
        url: "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png",
        attribution: CARTO_ATTR,
        max_zoom: 20,
    },
    Provider {
        name: "Esri.WorldImagery",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: ESRI_ATTR,
        max_zoom: 19,
    },
    Provider {
        name: "Esri.WorldTopoMap",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Topo_Map/MapServer/tile/{z}/{y}/{x}",
        attribution: ESRI_ATTR,
        max_zoom: 19,
    },
    Provider {
        name: "Esri.WorldStreetMap",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Street_Map/MapServer/tile/{z}/{y}/{x}",
        attribution: ESRI_ATTR,
        max_zoom: 19,
    },
    Provider {
        name: "Esri.NatGeoWorldMap",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/NatGeo_World_Map/MapServer/tile/{z}/{y}/{x}",
        attribution: ESRI_ATTR,
        max_zoom: 16,
    },
    Provider {
        name: "Stadia.StamenTerrain",
        url: "https://tiles.stadiamaps.com/tiles/stamen_terrain/{z}/{x}/{y}{r}.png",
        attribution: STADIA_ATTR,
        max_zoom: 18,
    },
    Provider {
        name: "Stadia.StamenToner",
        url: "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}{r}.png",
        attribution: STADIA_ATTR,
        max_zoom: 20,
    },
    Provider {
        name: "Stadia.StamenWatercolor",
        url: "https://tiles.stadiamaps.com/tiles/stamen_watercolor/{z}/{x}/{y}.jpg",
        attribution: STADIA_ATTR,
        max_zoom: 16,
    },
    Provider {
        name: "Stadia.AlidadeSmooth",
        url: "https://tiles.stadiamaps.com/tiles/alidade_smooth/{z}/{x}/{y}{r}.png",
        attribution: STADIA_ATTR,
        max_zoom: 20,
    },
    Provider {
        name: "USGS.USTopo",
        url: "https://basemap.nationalmap.gov/arcgis/rest/services/USGSTopo/MapServer/tile/{z}/{y}/{x}",
        attribution: "Tiles courtesy of the U.S. Geological Survey",
        max_zoom: 20,
    },
    Provider {
        name: "USGS.USImagery",
        url: "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/{z}/{y}/{x}",
        attribution: "Tiles courtesy of the U.S. Geological Survey",
        max_zoom: 20,
    },
];

/// Alternative spellings: (alias, canonical name).
pub const ALIASES: &[(&str, &str)] = &[
    ("OpenStreetMap", "OpenStreetMap.Mapnik"),
    ("OpenStreetMap.OSM", "OpenStreetMap.Mapnik"),
    ("CartoDB positron", "CartoDB.Positron"),
    ("CartoDB dark_matter", "CartoDB.DarkMatter"),
    ("Stamen Terrain", "Stadia.StamenTerrain"),
    ("Stamen Toner", "Stadia.StamenToner"),
    ("Stamen Watercolor", "Stadia.StamenWatercolor"),
];

/// Lookup table from basemap name to tile source.
#[derive(Debug, Clone)]
pub struct BasemapCatalog {
    sources: HashMap<String, TileSource>,
    /// Lower-cased name → key in `sources`.
    folded: HashMap<String, String>,
}

impl Default for BasemapCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BasemapCatalog {
    /// Empty catalog.
    pub fn empty() -> Self {
        Self {
            sources: HashMap::new(),
            folded: HashMap::new(),
        }
    }

    /// Catalog populated from [`PROVIDERS`] and [`ALIASES`].
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for p in PROVIDERS {
            catalog.register(p.name, p.to_source());
        }
        for (alias, canonical) in ALIASES {
            if let Some(source) = catalog.sources.get(*canonical).cloned() {
                catalog.register(*alias, source);
            }
        }
        catalog
    }

    /// Add or replace an entry.
    pub fn register(&mut self, name: impl Into<String>, source: TileSource) {
        let name = name.into();
        self.folded.insert(name.to_lowercase(), name.clone());
        self.sources.insert(name, source);
    }

    /// Resolve a name: exact match first, then case-insensitive.
    pub fn lookup(&self, name: &str) -> Result<&TileSource> {
        self.sources
            .get(name)
            .or_else(|| {
                self.folded
                    .get(&name.to_lowercase())
                    .and_then(|key| self.sources.get(key))
            })
            .ok_or_else(|| Error::UnknownBasemap(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// All names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
