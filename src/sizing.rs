//! Drawing-buffer sizing.
//!
//! Keeps the context's pixel buffer matched to the container's logical (CSS)
//! size at the current device pixel ratio, and scales the context transform
//! so drawing code always works in logical pixels.
//!
//! Invariant after every [`Sizing::apply`]:
//! `buffer = round(logical × dpr)` with `dpr` capped at the configured maximum.

use crate::draw::DrawingContext;

/// Largest logical or buffer edge a headless render accepts.
pub const MAX_RENDER_EDGE: u32 = 8192;

/// A container's bounding rectangle in client (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Result of measuring a container at a given device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceMetrics {
    pub dpr: f64,
    pub width: f64,
    pub height: f64,
    pub buffer_width: u32,
    pub buffer_height: u32,
}

impl SurfaceMetrics {
    /// Measure `rect` at `dpr`, capped at `max_dpr`.
    ///
    /// Non-finite or non-positive ratios are treated as 1; negative sizes
    /// as 0.
    pub fn measure(rect: Rect, dpr: f64, max_dpr: f64) -> Self {
        let dpr = effective_dpr(dpr, max_dpr);
        let width = non_negative(rect.width);
        let height = non_negative(rect.height);
        Self {
            dpr,
            width,
            height,
            buffer_width: (width * dpr).round() as u32,
            buffer_height: (height * dpr).round() as u32,
        }
    }

    /// Nothing can be drawn this frame.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Clamp a reported device pixel ratio to `(0, max_dpr]`.
pub fn effective_dpr(dpr: f64, max_dpr: f64) -> f64 {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let cap = if max_dpr.is_finite() && max_dpr >= 1.0 {
        max_dpr
    } else {
        1.0
    };
    dpr.min(cap)
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Tracks the current surface metrics and applies them to a context.
#[derive(Debug, Clone)]
pub struct Sizing {
    max_dpr: f64,
    metrics: SurfaceMetrics,
}

impl Sizing {
    pub fn new(max_dpr: f64) -> Self {
        Self {
            max_dpr,
            metrics: SurfaceMetrics::default(),
        }
    }

    pub fn metrics(&self) -> SurfaceMetrics {
        self.metrics
    }

    /// Re-measure and push the result to the context.
    ///
    /// Zero-size containers are recorded as-is; the render loop skips them.
    pub fn apply<C: DrawingContext>(
        &mut self,
        ctx: &mut C,
        rect: Rect,
        dpr: f64,
    ) -> SurfaceMetrics {
        let metrics = SurfaceMetrics::measure(rect, dpr, self.max_dpr);
        ctx.resize_buffer(metrics.buffer_width, metrics.buffer_height);
        ctx.set_scale(metrics.dpr);
        if metrics != self.metrics {
            log::debug!(
                "surface {}x{} @{}x -> buffer {}x{}",
                metrics.width,
                metrics.height,
                metrics.dpr,
                metrics.buffer_width,
                metrics.buffer_height
            );
        }
        self.metrics = metrics;
        metrics
    }
}
