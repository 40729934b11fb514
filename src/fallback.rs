//! Reduced-motion fallback: a static layered gradient.
//!
//! When motion is reduced the backdrop paints [`static_layers`] once and
//! never animates. The same composition is available as a CSS `background`
//! declaration ([`fallback_css`]) and a standalone HTML preview
//! ([`preview_page`]) for embeddings that want it without a canvas.
//!
//! ## Layout
//!
//! Each palette color gets a fixed anchor, chosen so three colors read like
//! the animated backdrop at rest (one left, one right, one low):
//!
//! | Layer | Anchor (x, y) |
//! |---|---|
//! | 0 | 25%, 35% |
//! | 1 | 75%, 30% |
//! | 2 | 50%, 80% |
//! | 3 | 15%, 85% |
//! | 4 | 85%, 80% |

use crate::color::Rgba;
use crate::draw::RadialGradient;
use crate::layers::{LayerStyle, layer_alpha, layer_radius};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Normalized anchors, indexed by layer.
pub const ANCHORS: [(f64, f64); 5] = [
    (0.25, 0.35),
    (0.75, 0.30),
    (0.50, 0.80),
    (0.15, 0.85),
    (0.85, 0.80),
];

/// Static gradient layers for a `width × height` surface.
pub fn static_layers(
    colors: &[Rgba],
    width: f64,
    height: f64,
    style: &LayerStyle,
) -> Vec<RadialGradient> {
    let max_radius = width.max(height) * style.radius_scale;
    colors
        .iter()
        .zip(ANCHORS)
        .enumerate()
        .map(|(i, (color, (ax, ay)))| RadialGradient {
            cx: ax * width,
            cy: ay * height,
            radius: layer_radius(max_radius, i),
            color: color.with_alpha(layer_alpha(style, i)),
        })
        .collect()
}

/// The static composition as a CSS `background` value.
///
/// CSS paints the first image on top, so the dark overlay comes first and
/// the layers follow in reverse draw order. Layer extents are expressed as a
/// share of the farthest-corner distance.
pub fn fallback_css(colors: &[Rgba], style: &LayerStyle, overlay: Rgba) -> String {
    let mut images = vec![format!(
        "linear-gradient({}, {})",
        overlay.to_css(overlay.a),
        overlay.to_css(overlay.a)
    )];
    let layers: Vec<String> = colors
        .iter()
        .zip(ANCHORS)
        .enumerate()
        .map(|(i, (color, (ax, ay)))| {
            let extent = (style.radius_scale * (0.6 + i as f64 * 0.25) * 100.0).round();
            format!(
                "radial-gradient(circle at {}% {}%, {} 0%, {} {}%)",
                (ax * 100.0).round(),
                (ay * 100.0).round(),
                color.to_css(layer_alpha(style, i)),
                color.to_css(0.0),
                extent
            )
        })
        .collect();
    images.extend(layers.into_iter().rev());
    images.join(",\n    ")
}

/// A CSS rule applying the fallback to `selector`.
pub fn fallback_rule(selector: &str, colors: &[Rgba], style: &LayerStyle, overlay: Rgba) -> String {
    format!(
        "{selector} {{\n  background:\n    {};\n  background-color: #000;\n}}\n",
        fallback_css(colors, style, overlay)
    )
}

/// Standalone HTML page showing the fallback full-bleed.
pub fn preview_page(colors: &[Rgba], style: &LayerStyle, overlay: Rgba) -> Markup {
    let css = format!(
        "html, body {{ margin: 0; height: 100%; }}\n{}",
        fallback_rule(".backdrop", colors, style, overlay)
    );
    let swatches: Vec<String> = colors.iter().map(|c| c.to_hex()).collect();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Backdrop preview" }
                style { (PreEscaped(css)) }
            }
            body {
                div.backdrop style="position: fixed; inset: 0;" data-palette=(swatches.join(" ")) {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<Rgba> {
        ["#5227FF", "#FF9FFC", "#B19EEF"]
            .iter()
            .map(|h| Rgba::from_hex(h).unwrap())
            .collect()
    }

    fn overlay() -> Rgba {
        Rgba::new(0, 0, 0, 0.45)
    }

    #[test]
    fn static_layers_use_anchors() {
        let layers = static_layers(&colors(), 400.0, 300.0, &LayerStyle::default());
        assert_eq!(layers.len(), 3);
        assert!((layers[0].cx - 100.0).abs() < 1e-9);
        assert!((layers[0].cy - 105.0).abs() < 1e-9);
        assert!((layers[2].cy - 240.0).abs() < 1e-9);
        assert!((layers[0].color.a - 0.65).abs() < 1e-12);
    }

    #[test]
    fn static_layers_cover_five_colors() {
        let five: Vec<Rgba> = (0..5).map(|i| Rgba::new(i, i, i, 1.0)).collect();
        assert_eq!(static_layers(&five, 10.0, 10.0, &LayerStyle::default()).len(), 5);
    }

    #[test]
    fn css_puts_overlay_on_top() {
        let css = fallback_css(&colors(), &LayerStyle::default(), overlay());
        let first = css.split(",\n").next().unwrap();
        assert!(first.starts_with("linear-gradient(rgba(0, 0, 0, 0.45)"));
    }

    #[test]
    fn css_lists_layers_in_reverse_draw_order() {
        let css = fallback_css(&colors(), &LayerStyle::default(), overlay());
        let purple = css.find("rgba(82, 39, 255, 0.65)").unwrap();
        let lavender = css.find("rgba(177, 158, 239, 0.41)").unwrap();
        assert!(lavender < purple);
        assert!(css.contains("circle at 25% 35%"));
        assert!(css.contains("rgba(82, 39, 255, 0) 48%"));
    }

    #[test]
    fn rule_wraps_css_in_selector() {
        let rule = fallback_rule(".hero", &colors(), &LayerStyle::default(), overlay());
        assert!(rule.starts_with(".hero {"));
        assert!(rule.trim_end().ends_with('}'));
    }

    #[test]
    fn preview_page_is_complete_html() {
        let page = preview_page(&colors(), &LayerStyle::default(), overlay()).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("class=\"backdrop\""));
        assert!(page.contains("data-palette=\"#5227ff #ff9ffc #b19eef\""));
        assert!(page.contains("radial-gradient"));
    }
}
