//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! Simulated 361 ticks, drew 361 frames, captured 61
//!     frame-0000.png @ 0ms
//!     frame-0001.png @ 100ms
//! Surface
//!     400x300 @2x → 800x600 buffer
//! Palette
//!     001 #5227ff
//!     002 #ff9ffc
//!     003 #b19eef
//! Frames
//!     001 frame-0000.png  t=0ms  pointer 0.500,0.500
//!     002 frame-0001.png  t=3100ms  pointer 0.912,0.510  (idle demo)
//! ```
//!
//! ## Check
//!
//! ```text
//! Palette
//!     001 #5227ff
//! Motion
//!     auto demo after 3000ms idle, speed 0.5, intensity 1
//! ```

use crate::config::BackdropConfig;
use crate::palette::MAX_COLORS;
use crate::render::RenderEvent;
use crate::types::RenderManifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn palette_lines(palette: &[String]) -> Vec<String> {
    let mut lines = vec!["Palette".to_string()];
    for (i, hex) in palette.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), hex));
    }
    lines
}

/// One progress line per render event.
pub fn format_render_event(event: &RenderEvent) -> Vec<String> {
    match event {
        RenderEvent::Simulated {
            ticks,
            drawn,
            captured,
        } => vec![format!(
            "Simulated {ticks} ticks, drew {drawn} frames, captured {captured}"
        )],
        RenderEvent::FrameWritten { file, at_ms } => {
            vec![format!("{}{} @ {}ms", indent(1), file, at_ms.round())]
        }
    }
}

pub fn format_render_output(manifest: &RenderManifest) -> Vec<String> {
    let mut lines = vec![
        "Surface".to_string(),
        format!(
            "{}{}x{} @{}x → {}x{} buffer",
            indent(1),
            manifest.width,
            manifest.height,
            manifest.device_pixel_ratio,
            manifest.buffer_width,
            manifest.buffer_height
        ),
    ];
    lines.extend(palette_lines(&manifest.palette));
    if !manifest.frames.is_empty() {
        lines.push("Frames".to_string());
        for (i, frame) in manifest.frames.iter().enumerate() {
            let mut line = format!(
                "{}{} {}  t={}ms  pointer {:.3},{:.3}",
                indent(1),
                format_index(i + 1),
                frame.file,
                frame.at_ms.round(),
                frame.pointer[0],
                frame.pointer[1]
            );
            if frame.idle {
                line.push_str("  (idle demo)");
            }
            lines.push(line);
        }
    }
    lines
}

pub fn format_config_summary(config: &BackdropConfig) -> Vec<String> {
    let used = config.palette.len().min(MAX_COLORS);
    let mut lines = palette_lines(&config.palette[..used]);
    if config.palette.is_empty() {
        lines.push(format!("{}(empty: default palette)", indent(1)));
    } else if config.palette.len() > MAX_COLORS {
        lines.push(format!(
            "{}({} listed, first {MAX_COLORS} used)",
            indent(1),
            config.palette.len()
        ));
    }

    lines.push("Motion".to_string());
    let m = &config.motion;
    if m.auto_demo {
        lines.push(format!(
            "{}auto demo after {}ms idle, speed {}, intensity {}",
            indent(1),
            m.idle_timeout_ms,
            m.auto_speed,
            m.auto_intensity
        ));
    } else {
        lines.push(format!("{}auto demo disabled", indent(1)));
    }

    let c = &config.composite;
    lines.push("Composite".to_string());
    lines.push(format!(
        "{}layer alpha {} - {} per layer, radius x{}, drift {}",
        indent(1),
        c.layer_alpha,
        c.layer_alpha_step,
        c.radius_scale,
        c.drift
    ));
    lines.push(format!(
        "{}overlay {} at {}",
        indent(1),
        c.overlay_color,
        c.overlay_alpha
    ));

    let r = &config.render;
    lines.push("Render".to_string());
    lines.push(format!(
        "{}{}x{} @{}x (max {}x), {}fps for {}s, every {} frame(s)",
        indent(1),
        r.width,
        r.height,
        r.device_pixel_ratio,
        config.surface.max_device_pixel_ratio,
        r.fps,
        r.duration_secs,
        r.capture_every
    ));
    lines
}

pub fn print_render_output(manifest: &RenderManifest) {
    for line in format_render_output(manifest) {
        println!("{}", line);
    }
}

pub fn print_config_summary(config: &BackdropConfig) {
    for line in format_config_summary(config) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameRecord;

    fn manifest() -> RenderManifest {
        RenderManifest {
            width: 400.0,
            height: 300.0,
            device_pixel_ratio: 2.0,
            buffer_width: 800,
            buffer_height: 600,
            fps: 60,
            palette: vec!["#5227ff".into(), "#ff9ffc".into()],
            ticks: 10,
            frames_drawn: 10,
            frames: vec![
                FrameRecord {
                    tick: 0,
                    at_ms: 0.0,
                    file: "frame-0000.png".into(),
                    pointer: [0.5, 0.5],
                    target: [0.5, 0.5],
                    phase: 0.0,
                    idle: false,
                },
                FrameRecord {
                    tick: 186,
                    at_ms: 3100.0,
                    file: "frame-0001.png".into(),
                    pointer: [0.9123, 0.51],
                    target: [0.92, 0.5],
                    phase: 0.05,
                    idle: true,
                },
            ],
        }
    }

    #[test]
    fn render_output_lists_surface_palette_frames() {
        let lines = format_render_output(&manifest());
        assert_eq!(lines[0], "Surface");
        assert_eq!(lines[1], "    400x300 @2x → 800x600 buffer");
        assert_eq!(lines[2], "Palette");
        assert_eq!(lines[3], "    001 #5227ff");
        assert_eq!(lines[5], "Frames");
        assert_eq!(
            lines[6],
            "    001 frame-0000.png  t=0ms  pointer 0.500,0.500"
        );
        assert_eq!(
            lines[7],
            "    002 frame-0001.png  t=3100ms  pointer 0.912,0.510  (idle demo)"
        );
    }

    #[test]
    fn render_output_omits_empty_frames_section() {
        let mut m = manifest();
        m.frames.clear();
        let lines = format_render_output(&m);
        assert!(!lines.iter().any(|l| l == "Frames"));
    }

    #[test]
    fn render_events_format() {
        assert_eq!(
            format_render_event(&RenderEvent::Simulated {
                ticks: 3,
                drawn: 2,
                captured: 1
            }),
            vec!["Simulated 3 ticks, drew 2 frames, captured 1"]
        );
        assert_eq!(
            format_render_event(&RenderEvent::FrameWritten {
                file: "frame-0002.png".into(),
                at_ms: 99.6
            }),
            vec!["    frame-0002.png @ 100ms"]
        );
    }

    #[test]
    fn config_summary_describes_defaults() {
        let lines = format_config_summary(&BackdropConfig::default());
        assert_eq!(lines[0], "Palette");
        assert_eq!(lines[1], "    001 #5227FF");
        let demo = "    auto demo after 3000ms idle, speed 0.5, intensity 1";
        assert!(lines.contains(&demo.to_string()));
        assert!(lines.contains(&"    overlay #000000 at 0.45".to_string()));
    }

    #[test]
    fn config_summary_notes_disabled_demo_and_empty_palette() {
        let mut config = BackdropConfig::default();
        config.motion.auto_demo = false;
        config.palette.clear();
        let lines = format_config_summary(&config);
        assert!(lines.contains(&"    (empty: default palette)".to_string()));
        assert!(lines.contains(&"    auto demo disabled".to_string()));
    }

    #[test]
    fn config_summary_shows_only_drawn_colors() {
        let config = BackdropConfig {
            palette: (1..=7).map(|i| format!("#00000{i}")).collect(),
            ..BackdropConfig::default()
        };
        let lines = format_config_summary(&config);
        assert_eq!(lines[5], "    005 #000005");
        assert_eq!(lines[6], "    (7 listed, first 5 used)");
        assert_eq!(lines[7], "Motion");
    }
}
