//! Backdrop configuration.
//!
//! Handles loading, validating, and merging `glowfield.toml`. User files are
//! sparse: stock defaults are the base layer and only the keys present in
//! the file override them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! palette = ["#5227FF", "#FF9FFC", "#B19EEF"]   # 1-5 colors, one layer each
//!
//! [motion]
//! auto_demo = true          # Drift on its own when nobody interacts
//! idle_timeout_ms = 3000    # Quiet time before the demo takes over
//! auto_speed = 0.5          # Demo phase advance per second
//! auto_intensity = 1.0      # Demo ellipse size, 0-1
//!
//! [composite]
//! layer_alpha = 0.65        # Center alpha of the first layer
//! layer_alpha_step = 0.12   # Alpha removed per following layer
//! overlay_color = "#000000" # Darkening overlay drawn on top
//! overlay_alpha = 0.45
//! radius_scale = 0.8        # Largest layer radius relative to the long edge
//! drift = 0.2               # How far layers wander from the pointer
//!
//! [surface]
//! max_device_pixel_ratio = 2.0
//!
//! [render]
//! width = 400               # Logical container size for headless renders
//! height = 300
//! device_pixel_ratio = 2.0
//! fps = 60
//! duration_secs = 6.0
//! capture_every = 6         # Write every Nth frame
//!
//! [processing]
//! max_processes = 4         # Max parallel PNG encoders (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::backdrop::{BackdropOptions, MotionOptions};
use crate::color::Rgba;
use crate::layers::LayerStyle;
use crate::palette::{DEFAULT_PALETTE, Palette};
use crate::sizing::{MAX_RENDER_EDGE, Rect, SurfaceMetrics};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `glowfield.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    /// Hex colors, one gradient layer each. Empty means the default palette;
    /// entries past the fifth are ignored.
    pub palette: Vec<String>,
    /// Idle-demo settings.
    pub motion: MotionConfig,
    /// Layer and overlay tuning.
    pub composite: CompositeConfig,
    /// Drawing-buffer limits.
    pub surface: SurfaceConfig,
    /// Headless render settings used by the CLI.
    pub render: RenderConfig,
    /// Parallel encoding settings.
    pub processing: ProcessingConfig,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            motion: MotionConfig::default(),
            composite: CompositeConfig::default(),
            surface: SurfaceConfig::default(),
            render: RenderConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl BackdropConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, entry) in self.palette.iter().enumerate() {
            Rgba::from_hex(entry)
                .map_err(|e| ConfigError::Validation(format!("palette[{i}]: {e}")))?;
        }

        let m = &self.motion;
        if !m.idle_timeout_ms.is_finite() || m.idle_timeout_ms < 0.0 {
            return Err(ConfigError::Validation(
                "motion.idle_timeout_ms must be a non-negative number".into(),
            ));
        }
        if !m.auto_speed.is_finite() {
            return Err(ConfigError::Validation(
                "motion.auto_speed must be finite".into(),
            ));
        }
        if !(0.0..=1.0).contains(&m.auto_intensity) {
            return Err(ConfigError::Validation(
                "motion.auto_intensity must be 0-1".into(),
            ));
        }

        let c = &self.composite;
        for (name, value) in [
            ("layer_alpha", c.layer_alpha),
            ("layer_alpha_step", c.layer_alpha_step),
            ("overlay_alpha", c.overlay_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "composite.{name} must be 0-1"
                )));
            }
        }
        Rgba::from_hex(&c.overlay_color)
            .map_err(|e| ConfigError::Validation(format!("composite.overlay_color: {e}")))?;
        if !(c.radius_scale.is_finite() && c.radius_scale > 0.0) {
            return Err(ConfigError::Validation(
                "composite.radius_scale must be positive".into(),
            ));
        }
        if !(c.drift.is_finite() && c.drift >= 0.0) {
            return Err(ConfigError::Validation(
                "composite.drift must be non-negative".into(),
            ));
        }

        if !(1.0..=4.0).contains(&self.surface.max_device_pixel_ratio) {
            return Err(ConfigError::Validation(
                "surface.max_device_pixel_ratio must be 1-4".into(),
            ));
        }

        let r = &self.render;
        for (name, value) in [("width", r.width), ("height", r.height)] {
            if value == 0 || value > MAX_RENDER_EDGE {
                return Err(ConfigError::Validation(format!(
                    "render.{name} must be 1-{MAX_RENDER_EDGE}"
                )));
            }
        }
        if !(r.device_pixel_ratio.is_finite() && r.device_pixel_ratio > 0.0) {
            return Err(ConfigError::Validation(
                "render.device_pixel_ratio must be positive".into(),
            ));
        }
        let metrics = SurfaceMetrics::measure(
            Rect::sized(r.width as f64, r.height as f64),
            r.device_pixel_ratio,
            self.surface.max_device_pixel_ratio,
        );
        if metrics.buffer_width > MAX_RENDER_EDGE || metrics.buffer_height > MAX_RENDER_EDGE {
            return Err(ConfigError::Validation(format!(
                "render.device_pixel_ratio gives a {}x{} buffer; edges must be at most \
                 {MAX_RENDER_EDGE}",
                metrics.buffer_width, metrics.buffer_height
            )));
        }
        if r.fps == 0 || r.fps > 240 {
            return Err(ConfigError::Validation("render.fps must be 1-240".into()));
        }
        if !(r.duration_secs.is_finite() && r.duration_secs > 0.0 && r.duration_secs <= 600.0) {
            return Err(ConfigError::Validation(
                "render.duration_secs must be in (0, 600]".into(),
            ));
        }
        if r.capture_every == 0 {
            return Err(ConfigError::Validation(
                "render.capture_every must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Validate and convert into component options.
    pub fn options(&self) -> Result<BackdropOptions, ConfigError> {
        self.validate()?;
        let palette = Palette::from_hex(&self.palette)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        let overlay = Rgba::from_hex(&self.composite.overlay_color)
            .map_err(|e| ConfigError::Validation(e.to_string()))?
            .with_alpha(self.composite.overlay_alpha);
        Ok(BackdropOptions {
            palette,
            motion: MotionOptions {
                auto_demo: self.motion.auto_demo,
                idle_timeout_ms: self.motion.idle_timeout_ms,
                auto_speed: self.motion.auto_speed,
                auto_intensity: self.motion.auto_intensity,
            },
            style: LayerStyle {
                layer_alpha: self.composite.layer_alpha,
                layer_alpha_step: self.composite.layer_alpha_step,
                radius_scale: self.composite.radius_scale,
                drift: self.composite.drift,
            },
            overlay,
            max_dpr: self.surface.max_device_pixel_ratio,
        })
    }
}

/// Idle-demo settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Follow a synthetic path once the pointer has been idle.
    pub auto_demo: bool,
    /// Milliseconds without interaction before the demo starts.
    pub idle_timeout_ms: f64,
    /// Demo phase advance per second.
    pub auto_speed: f64,
    /// Demo ellipse size, 0 (still) to 1 (widest).
    pub auto_intensity: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        let d = MotionOptions::default();
        Self {
            auto_demo: d.auto_demo,
            idle_timeout_ms: d.idle_timeout_ms,
            auto_speed: d.auto_speed,
            auto_intensity: d.auto_intensity,
        }
    }
}

/// Layer and overlay tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositeConfig {
    pub layer_alpha: f64,
    pub layer_alpha_step: f64,
    pub overlay_color: String,
    pub overlay_alpha: f64,
    pub radius_scale: f64,
    pub drift: f64,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        let style = LayerStyle::default();
        Self {
            layer_alpha: style.layer_alpha,
            layer_alpha_step: style.layer_alpha_step,
            overlay_color: "#000000".to_string(),
            overlay_alpha: 0.45,
            radius_scale: style.radius_scale,
            drift: style.drift,
        }
    }
}

/// Drawing-buffer limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    /// Device pixel ratios above this are capped.
    pub max_device_pixel_ratio: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            max_device_pixel_ratio: 2.0,
        }
    }
}

/// Headless render settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Logical container width in CSS pixels.
    pub width: u32,
    /// Logical container height in CSS pixels.
    pub height: u32,
    /// Reported device pixel ratio (capped by `surface`).
    pub device_pixel_ratio: f64,
    /// Simulated frames per second.
    pub fps: u32,
    /// Simulated time span.
    pub duration_secs: f64,
    /// Write every Nth drawn frame.
    pub capture_every: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            device_pixel_ratio: 2.0,
            fps: 60,
            duration_secs: 6.0,
            capture_every: 6,
        }
    }
}

/// Parallel encoding settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel PNG encoders.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BackdropConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a user
///   `palette` replaces the stock palette rather than extending it.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BackdropConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BackdropConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when the file
/// is missing.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(path: &Path) -> Result<BackdropConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        log::debug!("loaded config overrides from {}", path.display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `glowfield.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Glowfield Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Hex colors (#rgb or #rrggbb), one gradient layer each, drawn in order.
# At most 5 are used; an empty list falls back to this default.
palette = ["#5227FF", "#FF9FFC", "#B19EEF"]

# ---------------------------------------------------------------------------
# Idle demo
# ---------------------------------------------------------------------------
[motion]
# When nobody has moved the pointer for idle_timeout_ms, the glow follows a
# slow elliptical path on its own.
auto_demo = true
idle_timeout_ms = 3000.0

# Demo phase advance per second (radians).
auto_speed = 0.5

# Size of the demo ellipse, 0 (still) to 1 (widest).
auto_intensity = 1.0

# ---------------------------------------------------------------------------
# Compositing
# ---------------------------------------------------------------------------
[composite]
# Center alpha of the first layer; each following layer loses layer_alpha_step.
layer_alpha = 0.65
layer_alpha_step = 0.12

# Overlay drawn over all layers to darken and unify them.
overlay_color = "#000000"
overlay_alpha = 0.45

# Largest layer radius as a share of the container's long edge.
radius_scale = 0.8

# How far layer centers wander around the pointer, as a share of the container.
drift = 0.2

# ---------------------------------------------------------------------------
# Drawing surface
# ---------------------------------------------------------------------------
[surface]
# Higher device pixel ratios are capped to bound fill cost. Allowed: 1-4.
max_device_pixel_ratio = 2.0

# ---------------------------------------------------------------------------
# Headless rendering (glowfield render / still)
# ---------------------------------------------------------------------------
[render]
# Logical container size, 1-8192 per edge. After the ratio cap the drawing
# buffer must also stay within 8192 pixels per edge.
width = 400
height = 300
device_pixel_ratio = 2.0
fps = 60
duration_secs = 6.0

# Write every Nth drawn frame to disk.
capture_every = 6

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel PNG encoders.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
