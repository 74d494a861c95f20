//! Layer control widget placement.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Map corner a control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub const ALL: &[ControlPosition] = &[
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Leaflet's spelling (`"topright"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        }
    }
}

impl fmt::Display for ControlPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlPosition {
    type Err = Error;

    /// Accepts `topright`, `top-right` and `top_right` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == folded)
            .ok_or_else(|| Error::InvalidPosition(s.to_string()))
    }
}

/// A layer-switcher control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerControl {
    pub position: ControlPosition,
    pub collapsed: bool,
}

impl LayerControl {
    pub fn new(position: ControlPosition) -> Self {
        Self {
            position,
            collapsed: true,
        }
    }
}
