//! Software raster backend in pure Rust, backed by the `image` crate.
//!
//! ## Pixel model
//!
//! | Concern | Implementation |
//! |---|---|
//! | Storage | premultiplied `f32` RGBA, one entry per buffer pixel |
//! | Sampling | pixel centers mapped back to logical space through the scale |
//! | `SourceOver` | `dst = src + dst × (1 − src.a)` |
//! | `Lighter` | `dst = min(1, dst + src)` per channel |
//! | Export | unpremultiplied into `image::RgbaImage`, PNG via `image` |
//!
//! Colors are blended in gamma-encoded sRGB space, the same as a browser
//! canvas.

use crate::color::Rgba;
use crate::draw::{CompositeOp, DrawingContext, RadialGradient};
use crate::sizing::Rect;
use image::{ImageFormat, RgbaImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode {path}: {message}")]
    Encode { path: String, message: String },
    #[error("Nothing to encode: buffer is {0}x{1}")]
    EmptyBuffer(u32, u32),
}

/// Software implementation of [`DrawingContext`].
#[derive(Debug, Clone)]
pub struct RasterContext {
    width: u32,
    height: u32,
    scale: f64,
    composite: CompositeOp,
    pixels: Vec<[f32; 4]>,
}

impl RasterContext {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            scale: 1.0,
            composite: CompositeOp::SourceOver,
            pixels: Vec::new(),
        }
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Premultiplied RGBA at a buffer pixel, `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Snapshot the buffer as a straight-alpha image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, a] = self.pixels[self.index(x, y)];
            let un = |c: f32| {
                if a > 0.0 {
                    to_byte(c / a)
                } else {
                    0
                }
            };
            image::Rgba([un(r), un(g), un(b), to_byte(a)])
        })
    }

    /// Write the current buffer as a PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), RasterError> {
        save_png(&self.to_image(), path)
    }

    /// Run `shade` for every buffer pixel whose center falls inside `area`,
    /// blending the returned color with the current composite mode.
    fn fill_with(&mut self, area: Rect, shade: impl Fn(f64, f64) -> Rgba) {
        if self.pixels.is_empty() || area.is_empty() {
            return;
        }
        let s = self.scale;
        let x0 = ((area.left * s).floor().max(0.0) as u32).min(self.width);
        let y0 = ((area.top * s).floor().max(0.0) as u32).min(self.height);
        let x1 = (((area.left + area.width) * s).ceil().max(0.0) as u32).min(self.width);
        let y1 = (((area.top + area.height) * s).ceil().max(0.0) as u32).min(self.height);
        let composite = self.composite;

        for by in y0..y1 {
            let ly = (by as f64 + 0.5) / s;
            for bx in x0..x1 {
                let lx = (bx as f64 + 0.5) / s;
                let src = premultiply(shade(lx, ly));
                if src[3] <= 0.0 && composite == CompositeOp::SourceOver {
                    continue;
                }
                let i = self.index(bx, by);
                let dst = &mut self.pixels[i];
                blend(dst, src, composite);
            }
        }
    }
}

impl Default for RasterContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingContext for RasterContext {
    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 4]; (width as usize) * (height as usize)];
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn set_composite(&mut self, op: CompositeOp) {
        self.composite = op;
    }

    fn fill_radial(&mut self, area: Rect, gradient: &RadialGradient) {
        let g = *gradient;
        self.fill_with(area, move |x, y| g.sample(x, y));
    }

    fn fill_solid(&mut self, area: Rect, color: Rgba) {
        self.fill_with(area, move |_, _| color);
    }
}

fn premultiply(c: Rgba) -> [f32; 4] {
    let a = c.a as f32;
    [
        c.r as f32 / 255.0 * a,
        c.g as f32 / 255.0 * a,
        c.b as f32 / 255.0 * a,
        a,
    ]
}

fn blend(dst: &mut [f32; 4], src: [f32; 4], op: CompositeOp) {
    match op {
        CompositeOp::SourceOver => {
            let keep = 1.0 - src[3];
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s + *d * keep;
            }
        }
        CompositeOp::Lighter => {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = (*d + s).min(1.0);
            }
        }
    }
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Encode an image as PNG at `path`, creating parent directories.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), RasterError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(RasterError::EmptyBuffer(img.width(), img.height()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| RasterError::Encode {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
