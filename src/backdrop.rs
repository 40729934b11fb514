//! The backdrop component: lifecycle, event handling, and the render loop.
//!
//! A [`Backdrop`] is mounted on a [`Host`] and is in exactly one mode:
//!
//! | Mode | Frames | Listeners | Observer |
//! |---|---|---|---|
//! | Animated | one request per tick | pointer, touch, window resize, motion preference | yes |
//! | Static (reduced motion) | none | motion preference only | no |
//! | Inert (no 2D context) | none | none | no |
//! | Unmounted | none | none | no |
//!
//! A motion-preference change tears the current mode down completely and
//! mounts the other one on the same context. Static mode paints only at
//! mount: a zero-size container at that moment leaves it blank.
//!
//! ## Frame
//!
//! ```text
//! begin → size check → idle demo → smooth → clear
//!       → one radial layer per color ("lighter") → dark overlay ("source-over")
//!       → request next frame
//! ```
//!
//! Nothing here returns an error: a decorative background degrades to
//! drawing nothing.

use crate::color::Rgba;
use crate::draw::{CompositeOp, DrawingContext, RadialGradient};
use crate::fallback::static_layers;
use crate::host::{EventKind, FrameHandle, FrameLoop, Host, HostEvent, Subscriptions};
use crate::layers::{LayerStyle, compute_layers};
use crate::palette::Palette;
use crate::pointer::{PointerState, auto_amplitude};
use crate::sizing::{Rect, Sizing, SurfaceMetrics};

/// Largest frame delta fed to the idle demo and smoothing, in seconds.
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// Idle-demo behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionOptions {
    pub auto_demo: bool,
    pub idle_timeout_ms: f64,
    pub auto_speed: f64,
    pub auto_intensity: f64,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            auto_demo: true,
            idle_timeout_ms: 3000.0,
            auto_speed: 0.5,
            auto_intensity: 1.0,
        }
    }
}

/// Everything a backdrop needs from its embedding, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropOptions {
    pub palette: Palette,
    pub motion: MotionOptions,
    pub style: LayerStyle,
    /// Overlay color including its alpha.
    pub overlay: Rgba,
    pub max_dpr: f64,
}

impl Default for BackdropOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            motion: MotionOptions::default(),
            style: LayerStyle::default(),
            overlay: Rgba::new(0, 0, 0, 0.45),
            max_dpr: 2.0,
        }
    }
}

/// Lifecycle of the animated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Loop started, no frame processed yet.
    Mounted,
    Running,
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Animated,
    Static,
    Inert,
    Unmounted,
}

/// Result of delivering a frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// Zero-size surface: rescheduled without drawing.
    Skipped,
    /// Stale handle, static mode, or unmounted.
    Ignored,
}

#[derive(Debug)]
struct Animated<C> {
    ctx: C,
    sizing: Sizing,
    pointer: PointerState,
    frames: FrameLoop,
    subs: Subscriptions,
    lifecycle: Lifecycle,
    frames_drawn: u64,
}

/// Reduced-motion path: painted once at mount.
///
/// Nothing observes the container here, so a container that is zero-sized
/// at mount stays blank after it grows. Embeddings that can mount before
/// layout should style the container with [`crate::fallback::fallback_rule`]
/// as well.
#[derive(Debug)]
struct Static<C> {
    ctx: C,
    sizing: Sizing,
    subs: Subscriptions,
}

#[derive(Debug)]
enum Mode<C> {
    Animated(Animated<C>),
    Static(Static<C>),
    Inert,
    Unmounted,
}

#[derive(Debug)]
pub struct Backdrop<C> {
    options: BackdropOptions,
    mode: Mode<C>,
}

impl<C: DrawingContext> Backdrop<C> {
    /// Mount on `host`: animated unless the host prefers reduced motion,
    /// inert when no 2D context is available.
    pub fn mount<H: Host<Context = C>>(host: &mut H, options: BackdropOptions) -> Self {
        let Some(ctx) = host.create_context() else {
            log::debug!("no 2d context available; backdrop inert");
            return Self {
                options,
                mode: Mode::Inert,
            };
        };
        let mode = if host.prefers_reduced_motion() {
            Mode::Static(Static::mount(host, ctx, &options))
        } else {
            Mode::Animated(Animated::mount(host, ctx, &options))
        };
        Self { options, mode }
    }

    pub fn options(&self) -> &BackdropOptions {
        &self.options
    }

    pub fn mode(&self) -> ModeKind {
        match self.mode {
            Mode::Animated(_) => ModeKind::Animated,
            Mode::Static(_) => ModeKind::Static,
            Mode::Inert => ModeKind::Inert,
            Mode::Unmounted => ModeKind::Unmounted,
        }
    }

    /// Animated-path lifecycle; `None` in the other modes.
    pub fn lifecycle(&self) -> Option<Lifecycle> {
        match &self.mode {
            Mode::Animated(a) => Some(a.lifecycle),
            Mode::Unmounted => Some(Lifecycle::Unmounted),
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<&PointerState> {
        match &self.mode {
            Mode::Animated(a) => Some(&a.pointer),
            _ => None,
        }
    }

    pub fn metrics(&self) -> Option<SurfaceMetrics> {
        match &self.mode {
            Mode::Animated(a) => Some(a.sizing.metrics()),
            Mode::Static(s) => Some(s.sizing.metrics()),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&C> {
        match &self.mode {
            Mode::Animated(a) => Some(&a.ctx),
            Mode::Static(s) => Some(&s.ctx),
            _ => None,
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        match &self.mode {
            Mode::Animated(a) => a.frames_drawn,
            _ => 0,
        }
    }

    /// Handle a host event. Events for listeners this instance does not hold
    /// are ignored.
    pub fn handle_event<H: Host<Context = C>>(&mut self, host: &mut H, event: HostEvent) {
        let switch_to = match (&mut self.mode, event) {
            (Mode::Animated(a), HostEvent::MotionPreference { reduced: true }) => {
                a.subs.is_listening(EventKind::MotionPreference).then_some(true)
            }
            (Mode::Static(s), HostEvent::MotionPreference { reduced: false }) => {
                s.subs.is_listening(EventKind::MotionPreference).then_some(false)
            }
            (Mode::Animated(a), event) => {
                a.handle_event(host, event);
                None
            }
            _ => None,
        };
        if let Some(reduced) = switch_to {
            self.switch_motion(host, reduced);
        }
    }

    /// Run a delivered frame callback.
    pub fn on_frame<H: Host<Context = C>>(
        &mut self,
        host: &mut H,
        handle: FrameHandle,
    ) -> FrameOutcome {
        match &mut self.mode {
            Mode::Animated(a) => a.frame(host, handle, &self.options),
            _ => FrameOutcome::Ignored,
        }
    }

    /// Cancel the pending frame, disconnect the observer, and remove every
    /// listener. Idempotent.
    pub fn unmount<H: Host<Context = C>>(&mut self, host: &mut H) {
        match std::mem::replace(&mut self.mode, Mode::Unmounted) {
            Mode::Animated(mut a) => {
                a.teardown(host);
                log::debug!("backdrop unmounted after {} frames", a.frames_drawn);
            }
            Mode::Static(mut s) => {
                s.subs.clear(host);
                log::debug!("static backdrop unmounted");
            }
            Mode::Inert | Mode::Unmounted => {}
        }
    }

    fn switch_motion<H: Host<Context = C>>(&mut self, host: &mut H, reduced: bool) {
        self.mode = match std::mem::replace(&mut self.mode, Mode::Unmounted) {
            Mode::Animated(mut a) if reduced => {
                a.teardown(host);
                log::debug!("reduced motion requested; switching to static backdrop");
                Mode::Static(Static::mount(host, a.ctx, &self.options))
            }
            Mode::Static(mut s) if !reduced => {
                s.subs.clear(host);
                log::debug!("motion allowed again; switching to animated backdrop");
                Mode::Animated(Animated::mount(host, s.ctx, &self.options))
            }
            other => other,
        };
    }
}

impl<C: DrawingContext> Animated<C> {
    fn mount<H: Host<Context = C>>(host: &mut H, mut ctx: C, options: &BackdropOptions) -> Self {
        let mut sizing = Sizing::new(options.max_dpr);
        sizing.apply(&mut ctx, host.container_rect(), host.device_pixel_ratio());

        let mut subs = Subscriptions::new();
        subs.observe(host);
        subs.listen_all(host, &EventKind::ANIMATED);

        let mut frames = FrameLoop::new();
        frames.start(host);

        log::debug!(
            "animated backdrop mounted with {} layers",
            options.palette.len()
        );
        Self {
            ctx,
            sizing,
            pointer: PointerState::new(host.now_ms()),
            frames,
            subs,
            lifecycle: Lifecycle::Mounted,
            frames_drawn: 0,
        }
    }

    fn handle_event<H: Host<Context = C>>(&mut self, host: &mut H, event: HostEvent) {
        let subscribed = match event.kind() {
            Some(kind) => self.subs.is_listening(kind),
            None => self.subs.is_observing(),
        };
        if !subscribed {
            return;
        }
        match event {
            HostEvent::PointerMove { x, y }
            | HostEvent::TouchStart { x, y }
            | HostEvent::TouchMove { x, y } => {
                self.pointer
                    .record_pointer(x, y, host.container_rect(), host.now_ms());
            }
            HostEvent::WindowResize | HostEvent::ContainerResize => {
                self.sizing
                    .apply(&mut self.ctx, host.container_rect(), host.device_pixel_ratio());
            }
            HostEvent::MotionPreference { .. } => {}
        }
    }

    fn frame<H: Host<Context = C>>(
        &mut self,
        host: &mut H,
        handle: FrameHandle,
        options: &BackdropOptions,
    ) -> FrameOutcome {
        let now = host.now_ms();
        let Some(dt) = self.frames.begin(handle, now, MAX_FRAME_DELTA) else {
            return FrameOutcome::Ignored;
        };
        self.lifecycle = Lifecycle::Running;

        let mut metrics = self.sizing.metrics();
        if metrics.is_empty() {
            let rect = host.container_rect();
            if !rect.is_empty() {
                metrics = self
                    .sizing
                    .apply(&mut self.ctx, rect, host.device_pixel_ratio());
            }
        }
        if metrics.is_empty() {
            self.frames.schedule(host);
            return FrameOutcome::Skipped;
        }

        let motion = &options.motion;
        if motion.auto_demo {
            self.pointer.advance_idle(
                now,
                motion.idle_timeout_ms,
                motion.auto_speed,
                auto_amplitude(motion.auto_intensity),
                dt,
            );
        }
        self.pointer.smooth(dt);

        let layers = compute_layers(
            self.pointer.current,
            self.pointer.phase,
            metrics.width,
            metrics.height,
            options.palette.colors(),
            &options.style,
        );
        paint(&mut self.ctx, metrics, &layers, options.overlay);
        self.frames_drawn += 1;
        log::trace!(
            "frame {} dt={dt:.4} pointer=({:.3}, {:.3}) phase={:.3}",
            self.frames_drawn,
            self.pointer.current.x,
            self.pointer.current.y,
            self.pointer.phase
        );

        self.frames.schedule(host);
        FrameOutcome::Drawn
    }

    fn teardown<H: Host<Context = C>>(&mut self, host: &mut H) {
        self.frames.stop(host);
        self.subs.clear(host);
        self.lifecycle = Lifecycle::Unmounted;
    }
}

impl<C: DrawingContext> Static<C> {
    /// Paint once. No frames, no pointer tracking, no resize observer.
    fn mount<H: Host<Context = C>>(host: &mut H, mut ctx: C, options: &BackdropOptions) -> Self {
        let mut sizing = Sizing::new(options.max_dpr);
        let metrics = sizing.apply(&mut ctx, host.container_rect(), host.device_pixel_ratio());
        if !metrics.is_empty() {
            let layers = static_layers(
                options.palette.colors(),
                metrics.width,
                metrics.height,
                &options.style,
            );
            paint(&mut ctx, metrics, &layers, options.overlay);
        }

        let mut subs = Subscriptions::new();
        subs.listen(host, EventKind::MotionPreference);
        log::debug!("static backdrop mounted");
        Self { ctx, sizing, subs }
    }
}

/// Clear, add every layer with "lighter", then darken with the overlay.
fn paint<C: DrawingContext>(
    ctx: &mut C,
    metrics: SurfaceMetrics,
    layers: &[RadialGradient],
    overlay: Rgba,
) {
    let area = Rect::sized(metrics.width, metrics.height);
    ctx.clear();
    ctx.set_composite(CompositeOp::Lighter);
    for layer in layers {
        ctx.fill_radial(area, layer);
    }
    ctx.set_composite(CompositeOp::SourceOver);
    ctx.fill_solid(area, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::tests::{DrawOp, RecordingContext};
    use crate::headless::{HeadlessHost, Simulation};
    use crate::pointer::Point;
    use crate::test_helpers::{assert_released, mount_recording, recording_host, run_until};

    #[test]
    fn mount_starts_animated_loop() {
        let (h, ctx) = recording_host(400.0, 300.0);
        let sim = Simulation::mount(h, BackdropOptions::default());
        assert_eq!(sim.backdrop.mode(), ModeKind::Animated);
        assert_eq!(sim.backdrop.lifecycle(), Some(Lifecycle::Mounted));
        assert_eq!(sim.host.pending_frames(), 1);
        assert!(sim.host.is_observing());
        assert_eq!(sim.host.listener_count(), EventKind::ANIMATED.len());
        assert_eq!(ctx.ops(), vec![DrawOp::Resize(800, 600), DrawOp::Scale(2.0)]);
    }

    #[test]
    fn frame_draws_layers_then_overlay() {
        let (h, ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        ctx.reset();
        let report = sim.tick(16.0);
        assert!(report.drawn);
        assert_eq!(report.requests, 1);
        assert_eq!(sim.backdrop.lifecycle(), Some(Lifecycle::Running));

        let ops = ctx.ops();
        assert_eq!(ops[0], DrawOp::Clear);
        assert_eq!(ops[1], DrawOp::Composite(CompositeOp::Lighter));
        assert!(matches!(ops[2], DrawOp::Radial(_)));
        assert!(matches!(ops[4], DrawOp::Radial(_)));
        assert_eq!(ops[5], DrawOp::Composite(CompositeOp::SourceOver));
        assert_eq!(ops[6], DrawOp::Solid(Rgba::new(0, 0, 0, 0.45)));
        assert_eq!(ops.len(), 7);
    }

    #[test]
    fn pointer_moves_target_and_current_follows() {
        let (h, _ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        sim.tick(0.0);
        sim.host.set_time(10.0);
        assert!(sim.dispatch(HostEvent::PointerMove { x: 100.0, y: 75.0 }));
        assert_eq!(
            sim.backdrop.pointer().unwrap().target,
            Point::new(0.25, 0.25)
        );
        for i in 1..=120 {
            sim.tick(i as f64 * 1000.0 / 60.0);
        }
        let p = sim.backdrop.pointer().unwrap();
        assert!(p.current.distance(Point::new(0.25, 0.25)) < 1e-3);
        assert_eq!(p.phase, 0.0);
    }

    #[test]
    fn touch_is_tracked_like_pointer() {
        let (h, _ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        sim.host.set_time(50.0);
        sim.dispatch(HostEvent::TouchStart { x: 400.0, y: 0.0 });
        assert_eq!(sim.backdrop.pointer().unwrap().target, Point::new(1.0, 0.0));
        assert_eq!(sim.backdrop.pointer().unwrap().last_interaction_ms, 50.0);
    }

    #[test]
    fn auto_demo_disabled_keeps_target() {
        let (h, _ctx) = recording_host(400.0, 300.0);
        let options = BackdropOptions {
            motion: MotionOptions {
                auto_demo: false,
                ..MotionOptions::default()
            },
            ..BackdropOptions::default()
        };
        let mut sim = Simulation::mount(h, options);
        for i in 0..400 {
            sim.tick(i as f64 * 16.0);
        }
        let p = sim.backdrop.pointer().unwrap();
        assert_eq!(p.target, Point::CENTER);
        assert_eq!(p.phase, 0.0);
    }

    #[test]
    fn zero_size_skips_and_requests_once_per_tick() {
        let (h, ctx) = recording_host(0.0, 0.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        ctx.reset();
        for i in 1..=30 {
            let report = sim.tick(i as f64 * 16.0);
            assert_eq!(report.frames_run, 1);
            assert_eq!(report.requests, 1);
            assert!(!report.drawn);
            assert_eq!(sim.host.pending_frames(), 1);
        }
        assert_eq!(ctx.count(|op| matches!(op, DrawOp::Radial(_) | DrawOp::Clear)), 0);
    }

    #[test]
    fn zero_size_recovers_when_container_grows() {
        let (h, _ctx) = recording_host(0.0, 0.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        assert!(!sim.tick(16.0).drawn);
        for event in sim.host.resize(Rect::sized(200.0, 100.0), None) {
            sim.dispatch(event);
        }
        assert!(sim.tick(32.0).drawn);
        assert_eq!(sim.backdrop.metrics().unwrap().buffer_width, 400);
    }

    #[test]
    fn zero_size_picks_up_size_without_resize_event() {
        let (h, _ctx) = recording_host(0.0, 0.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        sim.tick(16.0);
        // Geometry changes but nobody is notified.
        sim.host.resize(Rect::sized(50.0, 50.0), None);
        assert!(sim.tick(32.0).drawn);
    }

    #[test]
    fn unmount_releases_everything() {
        let (h, ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        sim.tick(16.0);
        sim.backdrop.unmount(&mut sim.host);

        assert_eq!(sim.backdrop.mode(), ModeKind::Unmounted);
        assert_released(&sim.host);
        assert_eq!(sim.host.stats().frame_cancels, 1);

        ctx.reset();
        assert!(!sim.dispatch(HostEvent::PointerMove { x: 1.0, y: 1.0 }));
        for event in sim.host.resize(Rect::sized(10.0, 10.0), None) {
            sim.dispatch(event);
        }
        // Direct delivery after unmount is ignored too.
        sim.backdrop
            .handle_event(&mut sim.host, HostEvent::ContainerResize);
        assert_eq!(sim.tick(32.0).frames_run, 0);
        assert!(ctx.ops().is_empty());

        sim.backdrop.unmount(&mut sim.host);
        assert_eq!(sim.host.stats().frame_cancels, 1);
    }

    #[test]
    fn stale_frame_handle_is_ignored() {
        let (h, _ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        let outcome = sim
            .backdrop
            .on_frame(&mut sim.host, FrameHandle(9999));
        assert_eq!(outcome, FrameOutcome::Ignored);
    }

    #[test]
    fn missing_context_is_inert() {
        let mut h: HeadlessHost<RecordingContext> =
            HeadlessHost::without_context(Rect::sized(400.0, 300.0), 1.0);
        let mut b = Backdrop::mount(&mut h, BackdropOptions::default());
        assert_eq!(b.mode(), ModeKind::Inert);
        assert_eq!(h.stats().frame_requests, 0);
        assert_eq!(h.stats().listeners_added, 0);
        b.handle_event(&mut h, HostEvent::PointerMove { x: 0.0, y: 0.0 });
        assert!(b.pointer().is_none());
        b.unmount(&mut h);
    }

    #[test]
    fn reduced_motion_paints_once_without_loop() {
        let (h, ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h.with_reduced_motion(true), BackdropOptions::default());
        assert_eq!(sim.backdrop.mode(), ModeKind::Static);
        let stats = sim.host.stats();
        assert_eq!(stats.frame_requests, 0);
        assert_eq!(stats.pointer_listeners_added, 0);
        assert_eq!(stats.resize_listeners_added, 0);
        assert_eq!(stats.observers_connected, 0);
        assert!(sim.host.is_listening(EventKind::MotionPreference));
        assert_eq!(ctx.count(|op| matches!(op, DrawOp::Radial(_))), 3);

        let painted = ctx.ops().len();
        for i in 0..10 {
            sim.tick(i as f64 * 16.0);
        }
        assert!(!sim.dispatch(HostEvent::PointerMove { x: 5.0, y: 5.0 }));
        assert_eq!(ctx.ops().len(), painted);
    }

    #[test]
    fn motion_preference_switches_modes() {
        let (h, _ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        sim.tick(16.0);

        sim.host.set_reduced_motion(true);
        assert!(sim.dispatch(HostEvent::MotionPreference { reduced: true }));
        assert_eq!(sim.backdrop.mode(), ModeKind::Static);
        assert_eq!(sim.host.pending_frames(), 0);
        assert!(!sim.host.is_observing());
        assert!(!sim.host.is_listening(EventKind::PointerMove));
        assert_eq!(sim.host.listener_count(), 1);

        sim.host.set_reduced_motion(false);
        assert!(sim.dispatch(HostEvent::MotionPreference { reduced: false }));
        assert_eq!(sim.backdrop.mode(), ModeKind::Animated);
        assert_eq!(sim.host.pending_frames(), 1);
        assert!(sim.host.is_observing());
        assert_eq!(sim.host.stats().contexts_created, 1);
    }

    #[test]
    fn same_preference_is_a_noop() {
        let (h, _ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h, BackdropOptions::default());
        sim.dispatch(HostEvent::MotionPreference { reduced: false });
        assert_eq!(sim.backdrop.mode(), ModeKind::Animated);
        assert_eq!(sim.host.stats().frame_requests, 1);
    }

    #[test]
    fn large_gaps_are_clamped() {
        let (h, _ctx) = recording_host(400.0, 300.0);
        let options = BackdropOptions {
            motion: MotionOptions {
                idle_timeout_ms: 0.0,
                auto_speed: 1.0,
                ..MotionOptions::default()
            },
            ..BackdropOptions::default()
        };
        let mut sim = Simulation::mount(h, options);
        sim.tick(1.0);
        sim.tick(60_000.0);
        let phase = sim.backdrop.pointer().unwrap().phase;
        assert!((phase - MAX_FRAME_DELTA).abs() < 1e-12);
    }

    #[test]
    fn idle_demo_takes_over_after_timeout() {
        let (mut sim, _ctx) = mount_recording(400.0, 300.0, BackdropOptions::default());
        run_until(&mut sim, 0.0, 3000.0, 60);
        let p = sim.backdrop.pointer().unwrap();
        assert_eq!(p.target, Point::CENTER);
        assert_eq!(p.phase, 0.0);

        run_until(&mut sim, 3000.0 + 1000.0 / 60.0, 3100.0, 60);
        let p = sim.backdrop.pointer().unwrap();
        assert!(p.phase > 0.0);
        assert_ne!(p.target, Point::CENTER);
        assert!((0.08..=0.92).contains(&p.target.x));
        assert!((0.10..=0.90).contains(&p.target.y));
    }

    #[test]
    fn unmount_from_static_mode_releases_everything() {
        let (h, _ctx) = recording_host(400.0, 300.0);
        let mut sim = Simulation::mount(h.with_reduced_motion(true), BackdropOptions::default());
        sim.backdrop.unmount(&mut sim.host);
        assert_released(&sim.host);
        assert_eq!(sim.host.stats().frame_requests, 0);
    }

    #[test]
    fn static_mount_at_zero_size_stays_blank() {
        let (h, ctx) = recording_host(0.0, 0.0);
        let mut sim = Simulation::mount(h.with_reduced_motion(true), BackdropOptions::default());
        assert_eq!(sim.backdrop.mode(), ModeKind::Static);
        assert_eq!(ctx.count(|op| matches!(op, DrawOp::Clear | DrawOp::Radial(_))), 0);

        assert!(sim.host.resize(Rect::sized(400.0, 300.0), None).is_empty());
        sim.tick(16.0);
        assert_eq!(ctx.count(|op| matches!(op, DrawOp::Clear | DrawOp::Radial(_))), 0);
        assert_eq!(sim.host.stats().observers_connected, 0);
    }
}
