//! Geographic coordinates used by the map view.

use serde::{Deserialize, Serialize};

/// WGS-84 coordinate as (latitude, longitude) in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Equator / prime meridian.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Leaflet's `[lat, lng]` array form.
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Geographic extent as (south-west, north-east) corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Build from `(west, south, east, north)`, the order tile servers report.
    pub fn from_wsen(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            south_west: LatLng::new(south, west),
            north_east: LatLng::new(north, east),
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Leaflet's `[[s, w], [n, e]]` array form.
    pub fn to_array(self) -> [[f64; 2]; 2] {
        [self.south_west.to_array(), self.north_east.to_array()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_wsen() {
        let b = LatLngBounds::from_wsen(-10.0, -5.0, 10.0, 5.0);
        assert_eq!(b.south_west, LatLng::new(-5.0, -10.0));
        assert_eq!(b.north_east, LatLng::new(5.0, 10.0));
        assert_eq!(b.center(), LatLng::ORIGIN);
        assert_eq!(b.to_array(), [[-5.0, -10.0], [5.0, 10.0]]);
    }
}
