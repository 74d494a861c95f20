//! Color schemes and multi-stop interpolation engine.
//!
//! Scheme names follow the matplotlib names that raster tile servers accept
//! as `colormap_name`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Returned when a colormap name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown colormap {0:?}")]
pub struct UnknownScheme(pub String);

/// Available color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Dark purple -> Teal -> Yellow (perceptually uniform)
    Viridis,
    /// Dark blue -> Magenta -> Yellow
    Plasma,
    /// Black -> Purple -> Pale yellow
    Magma,
    /// Blue -> Green -> Brown -> White (elevation)
    Terrain,
    /// White -> Black
    Greys,
    /// Red -> Yellow -> Green (NDVI-style indices)
    RdYlGn,
    /// Red -> White -> Blue (divergent data)
    RdBu,
    /// White -> Blue (water depth/moisture)
    Blues,
    /// Yellow -> Orange -> Red (accumulation, density)
    YlOrRd,
}

impl ColorScheme {
    /// All available schemes.
    pub const ALL: &[ColorScheme] = &[
        Self::Viridis,
        Self::Plasma,
        Self::Magma,
        Self::Terrain,
        Self::Greys,
        Self::RdYlGn,
        Self::RdBu,
        Self::Blues,
        Self::YlOrRd,
    ];

    /// Lower-case name understood by tile servers.
    pub fn server_name(&self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Magma => "magma",
            Self::Terrain => "terrain",
            Self::Greys => "greys",
            Self::RdYlGn => "rdylgn",
            Self::RdBu => "rdbu",
            Self::Blues => "blues",
            Self::YlOrRd => "ylorrd",
        }
    }

    fn stops(&self) -> &'static [ColorStop] {
        match self {
            Self::Viridis => VIRIDIS_STOPS,
            Self::Plasma => PLASMA_STOPS,
            Self::Magma => MAGMA_STOPS,
            Self::Terrain => TERRAIN_STOPS,
            Self::Greys => GREYS_STOPS,
            Self::RdYlGn => RDYLGN_STOPS,
            Self::RdBu => RDBU_STOPS,
            Self::Blues => BLUES_STOPS,
            Self::YlOrRd => YLORRD_STOPS,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.server_name())
    }
}

impl FromStr for ColorScheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let scheme = match name.as_str() {
            "gray" | "grey" | "grayscale" | "greyscale" | "gist_gray" => Self::Greys,
            "ndvi" => Self::RdYlGn,
            "divergent" | "bwr" => Self::RdBu,
            "water" => Self::Blues,
            _ => Self::ALL
                .iter()
                .copied()
                .find(|c| c.server_name() == name)
                .ok_or_else(|| UnknownScheme(s.to_string()))?,
        };
        Ok(scheme)
    }
}

// ─── Color stop definitions ────────────────────────────────────────────

const VIRIDIS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 68, 1, 84),
    ColorStop::new(0.25, 59, 82, 139),
    ColorStop::new(0.50, 33, 145, 140),
    ColorStop::new(0.75, 94, 201, 98),
    ColorStop::new(1.00, 253, 231, 37),
];

const PLASMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 13, 8, 135),
    ColorStop::new(0.25, 126, 3, 168),
    ColorStop::new(0.50, 204, 71, 120),
    ColorStop::new(0.75, 248, 149, 64),
    ColorStop::new(1.00, 240, 249, 33),
];

const MAGMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 0, 4),
    ColorStop::new(0.25, 81, 18, 124),
    ColorStop::new(0.50, 183, 55, 121),
    ColorStop::new(0.75, 252, 137, 97),
    ColorStop::new(1.00, 252, 253, 191),
];

const TERRAIN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 51, 51, 153),
    ColorStop::new(0.15, 0, 153, 255),
    ColorStop::new(0.25, 0, 204, 102),
    ColorStop::new(0.50, 255, 255, 153),
    ColorStop::new(0.75, 128, 92, 84),
    ColorStop::new(1.00, 255, 255, 255),
];

const GREYS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 255, 255, 255),
    ColorStop::new(1.0, 0, 0, 0),
];

const RDYLGN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 165, 0, 38),
    ColorStop::new(0.25, 244, 109, 67),
    ColorStop::new(0.50, 255, 255, 191),
    ColorStop::new(0.75, 102, 189, 99),
    ColorStop::new(1.00, 0, 104, 55),
];

const RDBU_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 103, 0, 31),
    ColorStop::new(0.25, 214, 96, 77),
    ColorStop::new(0.50, 247, 247, 247),
    ColorStop::new(0.75, 67, 147, 195),
    ColorStop::new(1.00, 5, 48, 97),
];

const BLUES_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 247, 251, 255),
    ColorStop::new(0.50, 107, 174, 214),
    ColorStop::new(1.00, 8, 48, 107),
];

const YLORRD_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 255, 255, 204),
    ColorStop::new(0.50, 253, 141, 60),
    ColorStop::new(1.00, 128, 0, 38),
];

// ─── Interpolation engine ──────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Evaluate a color scheme at normalized position `t` ∈ [0, 1].
///
/// Values outside the range clamp to the end colors; NaN maps to the first.
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t };
    multi_stop(scheme.stops(), t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints() {
        assert_eq!(evaluate(ColorScheme::Viridis, 0.0), Rgb::new(68, 1, 84));
        assert_eq!(evaluate(ColorScheme::Viridis, 1.0), Rgb::new(253, 231, 37));
    }

    #[test]
    fn greys_midpoint() {
        let c = evaluate(ColorScheme::Greys, 0.5);
        assert_eq!(c, Rgb::new(128, 128, 128));
    }

    #[test]
    fn clamping() {
        assert_eq!(evaluate(ColorScheme::Terrain, -0.5), Rgb::new(51, 51, 153));
        assert_eq!(evaluate(ColorScheme::Terrain, 1.5), Rgb::new(255, 255, 255));
        assert_eq!(evaluate(ColorScheme::Terrain, f64::NAN), Rgb::new(51, 51, 153));
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("viridis".parse::<ColorScheme>().unwrap(), ColorScheme::Viridis);
        assert_eq!("RdYlGn".parse::<ColorScheme>().unwrap(), ColorScheme::RdYlGn);
        assert_eq!("gray".parse::<ColorScheme>().unwrap(), ColorScheme::Greys);
        assert_eq!(
            "jet-ish".parse::<ColorScheme>(),
            Err(UnknownScheme("jet-ish".into()))
        );
    }

    #[test]
    fn server_names_round_trip() {
        for &scheme in ColorScheme::ALL {
            assert_eq!(scheme.server_name().parse::<ColorScheme>().unwrap(), scheme);
        }
    }

    #[test]
    fn hex() {
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#ff0010");
    }
}
