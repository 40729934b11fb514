//! Pointer and idle-demo state.
//!
//! [`PointerState`] is the one mutable record a mounted backdrop owns.
//! Field ownership is split: input handlers write `target` and
//! `last_interaction_ms` through [`PointerState::record_pointer`], while the
//! frame tick owns `current` and `phase` through
//! [`PointerState::advance_idle`] and [`PointerState::smooth`].

use crate::sizing::Rect;

/// Base of the exponential smoothing factor, per 1/60 s.
pub const SMOOTHING_BASE: f64 = 0.001;

/// Horizontal and vertical amplitude of the demo ellipse at full intensity.
pub const MAX_AMPLITUDE: (f64, f64) = (0.42, 0.40);

/// A point in normalized container space, `[0, 1]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const CENTER: Point = Point { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    pub current: Point,
    pub target: Point,
    pub last_interaction_ms: f64,
    pub phase: f64,
}

impl PointerState {
    /// Fresh state centered in the container; `now_ms` counts as the last
    /// interaction so the demo waits a full timeout after mount.
    pub fn new(now_ms: f64) -> Self {
        Self {
            current: Point::CENTER,
            target: Point::CENTER,
            last_interaction_ms: now_ms,
            phase: 0.0,
        }
    }

    /// Record a real pointer or touch position given in client pixels.
    ///
    /// Ignored when the container has no area.
    pub fn record_pointer(&mut self, px: f64, py: f64, rect: Rect, now_ms: f64) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.target = Point::new(
            clamp01((px - rect.left) / rect.width),
            clamp01((py - rect.top) / rect.height),
        );
        self.last_interaction_ms = now_ms;
    }

    /// Whether the idle timeout has strictly elapsed.
    pub fn is_idle(&self, now_ms: f64, idle_timeout_ms: f64) -> bool {
        now_ms - self.last_interaction_ms > idle_timeout_ms
    }

    /// Drive the target along the demo ellipse once idle.
    ///
    /// Returns `true` when the demo path supplied the target this frame.
    pub fn advance_idle(
        &mut self,
        now_ms: f64,
        idle_timeout_ms: f64,
        auto_speed: f64,
        amplitude: (f64, f64),
        delta_seconds: f64,
    ) -> bool {
        if !self.is_idle(now_ms, idle_timeout_ms) {
            return false;
        }
        self.phase += delta_seconds * auto_speed;
        let (ax, ay) = amplitude;
        self.target = Point::new(
            0.5 + ax * self.phase.cos(),
            0.5 + ay * self.phase.sin(),
        );
        true
    }

    /// Move `current` toward `target`, frame-rate independent.
    pub fn smooth(&mut self, delta_seconds: f64) {
        let k = smoothing_factor(delta_seconds);
        self.current.x += (self.target.x - self.current.x) * k;
        self.current.y += (self.target.y - self.current.y) * k;
    }
}

/// `1 - 0.001^(dt * 60)`: the share of the remaining distance covered in
/// `delta_seconds`.
pub fn smoothing_factor(delta_seconds: f64) -> f64 {
    1.0 - SMOOTHING_BASE.powf(delta_seconds.max(0.0) * 60.0)
}

/// Demo ellipse amplitude for an intensity in `[0, 1]` (clamped).
pub fn auto_amplitude(intensity: f64) -> (f64, f64) {
    let k = if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    };
    (MAX_AMPLITUDE.0 * k, MAX_AMPLITUDE.1 * k)
}

fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) }
}
