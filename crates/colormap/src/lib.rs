//! # geoleaf Colormap
//!
//! Named color schemes for raster overlays.
//!
//! Scheme names are the ones raster tile servers accept (`viridis`,
//! `terrain`, `rdylgn`, ...), so a parsed [`ColorScheme`] can be forwarded to
//! the server as-is and also drawn locally as a legend.
//!
//! ## Usage
//!
//! ```
//! use geoleaf_colormap::{css_gradient, ColorScheme};
//!
//! let scheme: ColorScheme = "viridis".parse().unwrap();
//! let css = css_gradient(scheme, 8);
//! assert!(css.starts_with("linear-gradient"));
//! ```

mod legend;
mod scheme;

pub use legend::{css_gradient, legend_html, LegendParams};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb, UnknownScheme};
