//! 2D drawing context trait and shared draw types.
//!
//! The [`DrawingContext`] trait is the subset of a canvas 2D context the
//! backdrop needs: buffer sizing, a uniform scale transform, clearing,
//! compositing mode, and filling the surface with a radial gradient or a
//! solid color.
//!
//! The production implementation is
//! [`RasterContext`](crate::raster::RasterContext), a software rasterizer
//! over `image::RgbaImage`. Tests use a recording mock.

use crate::color::Rgba;
use crate::sizing::Rect;

/// How a fill combines with what is already in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOp {
    /// Normal alpha blending.
    #[default]
    SourceOver,
    /// Additive blending: overlapping layers brighten.
    Lighter,
}

/// A radial gradient from `color` at the center to fully transparent at
/// `radius`, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub color: Rgba,
}

impl RadialGradient {
    /// Color at a logical position: linear falloff of alpha from center to edge.
    pub fn sample(&self, x: f64, y: f64) -> Rgba {
        if self.radius <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let t = ((x - self.cx).hypot(y - self.cy) / self.radius).min(1.0);
        self.color.with_alpha(self.color.a * (1.0 - t))
    }
}

/// Canvas-like drawing surface owned exclusively by one backdrop.
pub trait DrawingContext {
    /// Set the pixel buffer size. Discards existing content.
    fn resize_buffer(&mut self, width: u32, height: u32);

    /// Set a uniform scale so logical coordinates map to buffer pixels.
    fn set_scale(&mut self, scale: f64);

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    fn set_composite(&mut self, op: CompositeOp);

    /// Fill `area` (logical pixels) with a radial gradient.
    fn fill_radial(&mut self, area: Rect, gradient: &RadialGradient);

    /// Fill `area` (logical pixels) with a solid color.
    fn fill_solid(&mut self, area: Rect, color: Rgba);
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// One recorded context call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        Resize(u32, u32),
        Scale(f64),
        Clear,
        Composite(CompositeOp),
        Radial(RadialGradient),
        Solid(Rgba),
    }

    /// Mock context that records calls without drawing.
    ///
    /// The log is shared so a test can keep a handle after the context has
    /// been moved into a backdrop.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingContext {
        log: Rc<RefCell<Vec<DrawOp>>>,
    }

    impl RecordingContext {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn ops(&self) -> Vec<DrawOp> {
            self.log.borrow().clone()
        }

        pub fn reset(&self) {
            self.log.borrow_mut().clear();
        }

        pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
            self.log.borrow().iter().filter(|op| pred(op)).count()
        }

        fn push(&self, op: DrawOp) {
            self.log.borrow_mut().push(op);
        }
    }

    impl DrawingContext for RecordingContext {
        fn resize_buffer(&mut self, width: u32, height: u32) {
            self.push(DrawOp::Resize(width, height));
        }

        fn set_scale(&mut self, scale: f64) {
            self.push(DrawOp::Scale(scale));
        }

        fn clear(&mut self) {
            self.push(DrawOp::Clear);
        }

        fn set_composite(&mut self, op: CompositeOp) {
            self.push(DrawOp::Composite(op));
        }

        fn fill_radial(&mut self, _area: Rect, gradient: &RadialGradient) {
            self.push(DrawOp::Radial(*gradient));
        }

        fn fill_solid(&mut self, _area: Rect, color: Rgba) {
            self.push(DrawOp::Solid(color));
        }
    }

    #[test]
    fn recording_context_shares_log_between_clones() {
        let ctx = RecordingContext::new();
        let mut moved = ctx.clone();
        moved.clear();
        moved.set_composite(CompositeOp::Lighter);
        assert_eq!(
            ctx.ops(),
            vec![DrawOp::Clear, DrawOp::Composite(CompositeOp::Lighter)]
        );
    }

    #[test]
    fn gradient_falls_off_linearly() {
        let g = RadialGradient {
            cx: 10.0,
            cy: 10.0,
            radius: 10.0,
            color: Rgba::new(255, 0, 0, 0.6),
        };
        assert!((g.sample(10.0, 10.0).a - 0.6).abs() < 1e-12);
        assert!((g.sample(15.0, 10.0).a - 0.3).abs() < 1e-12);
        assert_eq!(g.sample(30.0, 10.0).a, 0.0);
    }

    #[test]
    fn zero_radius_gradient_is_transparent() {
        let g = RadialGradient {
            cx: 0.0,
            cy: 0.0,
            radius: 0.0,
            color: Rgba::new(1, 2, 3, 1.0),
        };
        assert_eq!(g.sample(0.0, 0.0), Rgba::TRANSPARENT);
    }
}
