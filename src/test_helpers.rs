//! Shared test utilities for the glowfield test suite.
//!
//! Builders for a headless host backed by a [`RecordingContext`], a clock
//! driver for [`Simulation`], and the teardown assertion every lifecycle
//! test ends with.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (mut sim, ctx) = mount_recording(400.0, 300.0, BackdropOptions::default());
//! run_until(&mut sim, 0.0, 1000.0, 60);
//! sim.backdrop.unmount(&mut sim.host);
//! assert_released(&sim.host);
//! ```

use crate::backdrop::BackdropOptions;
use crate::draw::tests::RecordingContext;
use crate::headless::{HeadlessHost, Simulation};
use crate::sizing::Rect;

// =========================================================================
// Builders
// =========================================================================

/// A `w × h` host at pixel ratio 2 whose contexts share one draw log.
///
/// The returned context is a handle onto that log.
pub fn recording_host(w: f64, h: f64) -> (HeadlessHost<RecordingContext>, RecordingContext) {
    let ctx = RecordingContext::new();
    (HeadlessHost::new(ctx.clone(), Rect::sized(w, h), 2.0), ctx)
}

/// Mount a backdrop on a fresh [`recording_host`].
pub fn mount_recording(
    w: f64,
    h: f64,
    options: BackdropOptions,
) -> (Simulation<RecordingContext>, RecordingContext) {
    let (host, ctx) = recording_host(w, h);
    (Simulation::mount(host, options), ctx)
}

// =========================================================================
// Clock
// =========================================================================

/// Tick at `fps` from `from_ms` through `until_ms` inclusive. Returns the
/// number of ticks that drew.
pub fn run_until(
    sim: &mut Simulation<RecordingContext>,
    from_ms: f64,
    until_ms: f64,
    fps: u32,
) -> usize {
    let frame_ms = 1000.0 / fps as f64;
    let mut drawn = 0;
    let mut i = 0u64;
    loop {
        let at = from_ms + i as f64 * frame_ms;
        if at > until_ms {
            break;
        }
        if sim.tick(at).drawn {
            drawn += 1;
        }
        i += 1;
    }
    drawn
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert that nothing registered on `host` is still live: no pending frame,
/// no listener, no observer, and every add was matched by a remove.
pub fn assert_released(host: &HeadlessHost<RecordingContext>) {
    assert_eq!(host.pending_frames(), 0, "frame still pending");
    assert_eq!(host.listener_count(), 0, "listener still registered");
    assert!(!host.is_observing(), "observer still connected");
    let stats = host.stats();
    assert_eq!(stats.listeners_removed, stats.listeners_added);
    assert_eq!(stats.observers_disconnected, stats.observers_connected);
}
