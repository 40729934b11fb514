//! # Glowfield
//!
//! A pointer-reactive animated backdrop: up to five soft radial glows whose
//! positions follow a smoothed pointer, blended additively under a dark
//! overlay. With no input for a while the backdrop plays an idle demo that
//! orbits the center; when the viewer asks for reduced motion a static
//! composition is painted once instead.
//!
//! # Architecture: Backdrop Against a Host
//!
//! The backdrop never talks to a browser directly. Everything it needs from
//! the page goes through two traits:
//!
//! ```text
//! Host             clock, device pixel ratio, container rect, motion preference,
//!                  frame scheduling, event listeners, resize observation
//! DrawingContext   buffer resize, scale, clear, composite mode, fills
//! ```
//!
//! A page embedding supplies a canvas-backed implementation of both. This
//! crate ships a deterministic one: [`headless::HeadlessHost`] plus the
//! software rasterizer in [`raster`], which is what the CLI and the tests
//! drive.
//!
//! ```text
//! 1. Mount     Host + options  →  Backdrop (Animated | Static | Inert)
//! 2. Frames    host frame      →  step pointer, compute layers, paint
//! 3. Unmount   Backdrop        →  every listener, observer, and frame released
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`backdrop`] | Lifecycle, mode selection, and the per-frame step |
//! | [`pointer`] | Single-writer pointer state: target, smoothing, idle demo |
//! | [`layers`] | Gradient layer geometry for one frame |
//! | [`sizing`] | Logical size → drawing-buffer size with a capped pixel ratio |
//! | [`palette`] | Color list normalization (default, truncation) |
//! | [`color`] | Hex parsing and CSS `rgba()` conversion |
//! | [`draw`] | `DrawingContext` trait, composite modes, radial gradients |
//! | [`host`] | `Host` trait, subscription bookkeeping, frame loop |
//! | [`fallback`] | Static reduced-motion composition, as layers, CSS, or HTML |
//! | [`headless`] | Deterministic host and scripted simulation |
//! | [`raster`] | Software `DrawingContext` with PNG export |
//! | [`render`] | Headless render to a frame directory plus `frames.json` |
//! | [`config`] | `glowfield.toml` loading, validation, and merging |
//! | [`types`] | Types serialized into `frames.json` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Teardown
//!
//! Every listener and observer the backdrop registers is recorded in a
//! [`host::Subscriptions`] list, and the animation loop holds at most one
//! pending frame in a [`host::FrameLoop`]. Unmounting clears both, so a
//! stale frame callback can never draw into a detached surface.
//!
//! ## Frame-Rate Independent Smoothing
//!
//! The smoothed pointer moves toward its target by `1 - 0.001^(dt·60)` per
//! frame, so motion looks the same at 30, 60, or 144 Hz. Gaps between frames
//! (background tabs) are clamped to a quarter second.
//!
//! ## Reduced Motion Is Exclusive
//!
//! In static mode no frame is ever requested and no pointer listener is
//! registered. A change of preference tears the current mode down
//! completely before the other one mounts on the same drawing context.
//!
//! ## Colors Are Validated
//!
//! A malformed hex color is a config error, not a silently black layer.

pub mod backdrop;
pub mod color;
pub mod config;
pub mod draw;
pub mod fallback;
pub mod headless;
pub mod host;
pub mod layers;
pub mod output;
pub mod palette;
pub mod pointer;
pub mod raster;
pub mod render;
pub mod sizing;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
