//! Pure per-frame layer math.
//!
//! Given the smoothed pointer, the demo phase, the logical surface size and
//! the palette, compute one [`RadialGradient`] per palette color. No I/O and
//! no context access, so every constant here is unit testable.

use crate::color::Rgba;
use crate::draw::RadialGradient;
use crate::pointer::Point;
use std::f64::consts::FRAC_PI_2;

/// Aesthetic tuning for the composited layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    /// Center alpha of the first layer.
    pub layer_alpha: f64,
    /// Alpha removed per subsequent layer.
    pub layer_alpha_step: f64,
    /// `max_radius = max(width, height) × radius_scale`.
    pub radius_scale: f64,
    /// Drift of layer centers around the pointer, as a fraction of the surface.
    pub drift: f64,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            layer_alpha: 0.65,
            layer_alpha_step: 0.12,
            radius_scale: 0.8,
            drift: 0.2,
        }
    }
}

/// Angle driving layer `index`'s drift around the pointer.
pub fn layer_angle(phase: f64, index: usize) -> f64 {
    let i = index as f64;
    phase * (0.6 + i * 0.2) + i * FRAC_PI_2
}

/// Layer `index`'s share of the drift: deeper layers wander further.
pub fn layer_strength(index: usize, count: usize) -> f64 {
    (index as f64 + 1.0) / count.max(1) as f64
}

pub fn layer_radius(max_radius: f64, index: usize) -> f64 {
    max_radius * (0.6 + index as f64 * 0.25)
}

pub fn layer_alpha(style: &LayerStyle, index: usize) -> f64 {
    (style.layer_alpha - index as f64 * style.layer_alpha_step).clamp(0.0, 1.0)
}

/// Compute every gradient layer for one frame, in draw order.
pub fn compute_layers(
    pointer: Point,
    phase: f64,
    width: f64,
    height: f64,
    colors: &[Rgba],
    style: &LayerStyle,
) -> Vec<RadialGradient> {
    let max_radius = width.max(height) * style.radius_scale;
    let px = pointer.x * width;
    let py = pointer.y * height;
    let count = colors.len();

    colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let angle = layer_angle(phase, i);
            let strength = layer_strength(i, count) * style.drift;
            RadialGradient {
                cx: px + angle.cos() * strength * width,
                cy: py + angle.sin() * strength * height,
                radius: layer_radius(max_radius, i),
                color: color.with_alpha(layer_alpha(style, i)),
            }
        })
        .collect()
}
