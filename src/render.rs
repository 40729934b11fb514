//! Headless rendering to PNG.
//!
//! Mounts a backdrop on a [`HeadlessHost`] backed by a [`RasterContext`],
//! replays a [`Script`], and writes sampled frames:
//!
//! ```text
//! out/
//! ├── frames.json        # RenderManifest: settings + per-frame pointer state
//! ├── frame-0000.png
//! ├── frame-0001.png
//! └── ...
//! ```
//!
//! Simulation is sequential (each frame depends on the last). Captured
//! buffers are encoded in parallel with [rayon](https://docs.rs/rayon).

use crate::backdrop::{Backdrop, ModeKind};
use crate::config::{BackdropConfig, ConfigError};
use crate::headless::{HeadlessHost, Script, ScriptError, Simulation};
use crate::raster::{self, RasterContext, RasterError};
use crate::sizing::Rect;
use crate::types::{FrameRecord, RenderManifest};
use image::RgbaImage;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("Nothing was drawn: the backdrop is {0:?}")]
    NothingDrawn(ModeKind),
}

/// Progress reported while rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Simulated { ticks: u64, drawn: u64, captured: usize },
    FrameWritten { file: String, at_ms: f64 },
}

/// Result of [`render_frames`].
#[derive(Debug)]
pub struct RenderResult {
    pub manifest: RenderManifest,
    pub manifest_path: PathBuf,
}

struct Capture {
    tick: u64,
    at_ms: f64,
    pointer: [f64; 2],
    target: [f64; 2],
    phase: f64,
    idle: bool,
    image: RgbaImage,
}

/// Simulate `config.render` with `script` and write sampled frames to
/// `out_dir`.
pub fn render_frames(
    config: &BackdropConfig,
    script: &Script,
    out_dir: &Path,
    progress: Option<Sender<RenderEvent>>,
) -> Result<RenderResult, RenderError> {
    let options = config.options()?;
    let render = &config.render;
    let idle_timeout = options.motion.idle_timeout_ms;
    let host = HeadlessHost::new(
        RasterContext::new(),
        Rect::sized(render.width as f64, render.height as f64),
        render.device_pixel_ratio,
    );
    let mut sim = Simulation::mount(host, options);

    let capture_every = render.capture_every.max(1) as u64;
    let mut captures: Vec<Capture> = Vec::new();
    let mut ticks = 0u64;
    sim.run(
        script,
        render.duration_secs * 1000.0,
        render.fps,
        |tick, report, backdrop| {
            ticks = tick + 1;
            if !report.drawn || (backdrop.frames_drawn() - 1) % capture_every != 0 {
                return;
            }
            if let (Some(ctx), Some(p)) = (backdrop.context(), backdrop.pointer()) {
                captures.push(Capture {
                    tick,
                    at_ms: report.at_ms,
                    pointer: [p.current.x, p.current.y],
                    target: [p.target.x, p.target.y],
                    phase: p.phase,
                    idle: p.is_idle(report.at_ms, idle_timeout),
                    image: ctx.to_image(),
                });
            }
        },
    );

    let frames_drawn = sim.backdrop.frames_drawn();
    if let Some(tx) = &progress {
        tx.send(RenderEvent::Simulated {
            ticks,
            drawn: frames_drawn,
            captured: captures.len(),
        })
        .ok();
    }
    if captures.is_empty() {
        return Err(RenderError::NothingDrawn(sim.backdrop.mode()));
    }

    fs::create_dir_all(out_dir)?;
    let frames = captures
        .par_iter()
        .enumerate()
        .map(|(n, c)| {
            let file = format!("frame-{n:04}.png");
            raster::save_png(&c.image, &out_dir.join(&file))?;
            if let Some(tx) = &progress {
                tx.send(RenderEvent::FrameWritten {
                    file: file.clone(),
                    at_ms: c.at_ms,
                })
                .ok();
            }
            Ok(FrameRecord {
                tick: c.tick,
                at_ms: c.at_ms,
                file,
                pointer: c.pointer,
                target: c.target,
                phase: c.phase,
                idle: c.idle,
            })
        })
        .collect::<Result<Vec<_>, RasterError>>()?;

    let manifest = manifest_for(&sim.backdrop, render.fps, ticks, frames);
    let manifest_path = out_dir.join("frames.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    Ok(RenderResult {
        manifest,
        manifest_path,
    })
}

/// Render the reduced-motion fallback once and write it to `out`.
pub fn render_still(config: &BackdropConfig, out: &Path) -> Result<RenderManifest, RenderError> {
    let options = config.options()?;
    let render = &config.render;
    let host = HeadlessHost::new(
        RasterContext::new(),
        Rect::sized(render.width as f64, render.height as f64),
        render.device_pixel_ratio,
    )
    .with_reduced_motion(true);
    let sim = Simulation::mount(host, options);
    let ctx = sim
        .backdrop
        .context()
        .ok_or(RenderError::NothingDrawn(sim.backdrop.mode()))?;
    ctx.save_png(out)?;
    Ok(manifest_for(&sim.backdrop, render.fps, 0, Vec::new()))
}

fn manifest_for(
    backdrop: &Backdrop<RasterContext>,
    fps: u32,
    ticks: u64,
    frames: Vec<FrameRecord>,
) -> RenderManifest {
    let metrics = backdrop.metrics().unwrap_or_default();
    RenderManifest {
        width: metrics.width,
        height: metrics.height,
        device_pixel_ratio: metrics.dpr,
        buffer_width: metrics.buffer_width,
        buffer_height: metrics.buffer_height,
        fps,
        palette: backdrop
            .options()
            .palette
            .colors()
            .iter()
            .map(|c| c.to_hex())
            .collect(),
        ticks,
        frames_drawn: backdrop.frames_drawn(),
        frames,
    }
}
