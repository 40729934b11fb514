//! Types written to `frames.json` by a headless render.
//!
//! The manifest records what was simulated and, per written frame, the
//! pointer state that produced it, so a frame sequence can be checked
//! without decoding images.

use serde::{Deserialize, Serialize};

/// One written frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Tick index in the simulation (not the written-frame index).
    pub tick: u64,
    /// Simulated time of the tick in milliseconds.
    pub at_ms: f64,
    /// File name relative to the output directory.
    pub file: String,
    /// Smoothed pointer position, normalized.
    pub pointer: [f64; 2],
    /// Target pointer position, normalized.
    pub target: [f64; 2],
    /// Idle-demo phase.
    pub phase: f64,
    /// Whether the idle demo was driving the target.
    pub idle: bool,
}

/// Summary of a render run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderManifest {
    /// Logical container width at the end of the run.
    pub width: f64,
    pub height: f64,
    /// Effective (capped) device pixel ratio at the end of the run.
    pub device_pixel_ratio: f64,
    pub buffer_width: u32,
    pub buffer_height: u32,
    pub fps: u32,
    /// Palette actually drawn, as lowercase hex.
    pub palette: Vec<String>,
    pub ticks: u64,
    pub frames_drawn: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<FrameRecord>,
}
