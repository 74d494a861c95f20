//! Colorbar legends for raster overlays.

use crate::scheme::{evaluate, ColorScheme};

/// Parameters for a horizontal colorbar.
#[derive(Debug, Clone)]
pub struct LegendParams {
    pub scheme: ColorScheme,
    pub title: String,
    /// Number of sampled stops in the gradient.
    pub steps: usize,
}

impl LegendParams {
    pub fn new(scheme: ColorScheme, title: impl Into<String>) -> Self {
        Self {
            scheme,
            title: title.into(),
            steps: 8,
        }
    }
}

/// CSS `linear-gradient(...)` sampling the scheme at `steps` evenly spaced points.
pub fn css_gradient(scheme: ColorScheme, steps: usize) -> String {
    let steps = steps.max(2);
    let stops: Vec<String> = (0..steps)
        .map(|i| {
            let t = i as f64 / (steps - 1) as f64;
            format!("{} {:.0}%", evaluate(scheme, t).to_hex(), t * 100.0)
        })
        .collect();
    format!("linear-gradient(to right, {})", stops.join(", "))
}

/// HTML snippet of a titled colorbar.
///
/// The title is escaped; the output is safe to inline into a document.
pub fn legend_html(params: &LegendParams) -> String {
    format!(
        "<div class=\"geoleaf-legend\"><div class=\"geoleaf-legend-title\">{}</div>\
         <div class=\"geoleaf-legend-bar\" style=\"background: {};\"></div></div>",
        escape(&params.title),
        css_gradient(params.scheme, params.steps)
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        let g = css_gradient(ColorScheme::Greys, 2);
        assert_eq!(g, "linear-gradient(to right, #ffffff 0%, #000000 100%)");
    }

    #[test]
    fn gradient_has_requested_steps() {
        let g = css_gradient(ColorScheme::Viridis, 5);
        assert_eq!(g.matches('#').count(), 5);
        assert!(g.contains("50%"));
    }

    #[test]
    fn legend_escapes_title() {
        let html = legend_html(&LegendParams::new(ColorScheme::Blues, "<depth>"));
        assert!(html.contains("&lt;depth&gt;"));
        assert!(html.contains("linear-gradient"));
    }
}
