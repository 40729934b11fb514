//! Deterministic headless host and simulation driver.
//!
//! [`HeadlessHost`] implements [`Host`] with a manual clock, a settable
//! container, and bookkeeping of every frame request, listener, and observer
//! so tests can assert on scheduling and teardown. [`Simulation`] pairs a
//! host with a mounted [`Backdrop`] and replays a [`Script`] of input events
//! at a fixed frame rate.
//!
//! ## Script format
//!
//! ```json
//! {
//!   "events": [
//!     { "at_ms": 120, "kind": "pointer", "x": 200, "y": 150 },
//!     { "at_ms": 900, "kind": "touch", "x": 40, "y": 60 },
//!     { "at_ms": 1500, "kind": "resize", "width": 640, "height": 360, "dpr": 1.5 },
//!     { "at_ms": 2000, "kind": "reduced_motion", "enabled": true }
//!   ]
//! }
//! ```
//!
//! Pointer and touch positions are client pixels; the container's top-left
//! corner is at the origin.

use crate::backdrop::{Backdrop, BackdropOptions, FrameOutcome};
use crate::draw::DrawingContext;
use crate::host::{EventKind, FrameHandle, Host, HostEvent, ListenerId, ObserverHandle};
use crate::sizing::{MAX_RENDER_EDGE, Rect};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Script event {index} has invalid time {at_ms}")]
    InvalidTime { index: usize, at_ms: f64 },
    #[error(
        "Script event {index} resizes to {width}x{height}; edges must be 0-{max}",
        max = MAX_RENDER_EDGE
    )]
    InvalidSize {
        index: usize,
        width: f64,
        height: f64,
    },
    #[error("Script event {index} has invalid device pixel ratio {dpr}")]
    InvalidRatio { index: usize, dpr: f64 },
}

/// Scripted input replayed by a [`Simulation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: f64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptAction {
    Pointer {
        x: f64,
        y: f64,
    },
    Touch {
        x: f64,
        y: f64,
    },
    Resize {
        width: f64,
        height: f64,
        #[serde(default)]
        dpr: Option<f64>,
    },
    ReducedMotion {
        enabled: bool,
    },
}

impl Script {
    /// Parse and sort by time. Negative or non-finite times are rejected,
    /// as are resizes outside `0..=MAX_RENDER_EDGE` or to a non-positive
    /// ratio.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let mut script: Script = serde_json::from_str(json)?;
        let edge = |v: f64| v.is_finite() && (0.0..=MAX_RENDER_EDGE as f64).contains(&v);
        for (index, event) in script.events.iter().enumerate() {
            if !event.at_ms.is_finite() || event.at_ms < 0.0 {
                return Err(ScriptError::InvalidTime {
                    index,
                    at_ms: event.at_ms,
                });
            }
            if let ScriptAction::Resize { width, height, dpr } = event.action {
                if !(edge(width) && edge(height)) {
                    return Err(ScriptError::InvalidSize {
                        index,
                        width,
                        height,
                    });
                }
                if let Some(dpr) = dpr.filter(|d| !(d.is_finite() && *d > 0.0)) {
                    return Err(ScriptError::InvalidRatio { index, dpr });
                }
            }
        }
        script
            .events
            .sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Counters a test can inspect after driving a host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub frame_requests: u64,
    pub frame_cancels: u64,
    pub listeners_added: u64,
    pub listeners_removed: u64,
    pub pointer_listeners_added: u64,
    pub resize_listeners_added: u64,
    pub observers_connected: u64,
    pub observers_disconnected: u64,
    pub contexts_created: u64,
}

/// In-memory [`Host`] with a manual clock.
///
/// The context is cloned out on every [`Host::create_context`], matching a
/// canvas that hands back the same context on repeated requests when `C`
/// shares state between clones.
#[derive(Debug)]
pub struct HeadlessHost<C> {
    now_ms: f64,
    dpr: f64,
    rect: Rect,
    reduced_motion: bool,
    context: Option<C>,
    next_id: u64,
    frames: VecDeque<FrameHandle>,
    listeners: Vec<(ListenerId, EventKind)>,
    observers: Vec<ObserverHandle>,
    stats: HostStats,
}

impl<C: DrawingContext + Clone> HeadlessHost<C> {
    pub fn new(context: C, rect: Rect, dpr: f64) -> Self {
        Self {
            context: Some(context),
            ..Self::without_context(rect, dpr)
        }
    }

    /// Host whose context creation fails.
    pub fn without_context(rect: Rect, dpr: f64) -> Self {
        Self {
            now_ms: 0.0,
            dpr,
            rect,
            reduced_motion: false,
            context: None,
            next_id: 1,
            frames: VecDeque::new(),
            listeners: Vec::new(),
            observers: Vec::new(),
            stats: HostStats::default(),
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn set_time(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Change the container geometry and ratio.
    ///
    /// Returns the notifications the host would fire: a window resize when
    /// anyone listens for it, and an observer notification when observed.
    pub fn resize(&mut self, rect: Rect, dpr: Option<f64>) -> Vec<HostEvent> {
        self.rect = rect;
        if let Some(dpr) = dpr {
            self.dpr = dpr;
        }
        let mut events = Vec::new();
        if self.is_listening(EventKind::WindowResize) {
            events.push(HostEvent::WindowResize);
        }
        if self.is_observing() {
            events.push(HostEvent::ContainerResize);
        }
        events
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Pop the oldest outstanding frame request.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.frames.pop_front()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|(_, k)| *k == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_observing(&self) -> bool {
        !self.observers.is_empty()
    }

    /// Whether the host would deliver `event` to anyone.
    pub fn delivers(&self, event: &HostEvent) -> bool {
        match event.kind() {
            Some(kind) => self.is_listening(kind),
            None => self.is_observing(),
        }
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl<C: DrawingContext + Clone> Host for HeadlessHost<C> {
    type Context = C;

    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn container_rect(&self) -> Rect {
        self.rect
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn create_context(&mut self) -> Option<C> {
        let ctx = self.context.clone();
        if ctx.is_some() {
            self.stats.contexts_created += 1;
        }
        ctx
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next());
        self.frames.push_back(handle);
        self.stats.frame_requests += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
        self.stats.frame_cancels += 1;
    }

    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.push((id, kind));
        self.stats.listeners_added += 1;
        if kind.is_pointer() {
            self.stats.pointer_listeners_added += 1;
        }
        if kind == EventKind::WindowResize {
            self.stats.resize_listeners_added += 1;
        }
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        if self.listeners.len() < before {
            self.stats.listeners_removed += 1;
        }
    }

    fn observe_resize(&mut self) -> ObserverHandle {
        let handle = ObserverHandle(self.next());
        self.observers.push(handle);
        self.stats.observers_connected += 1;
        handle
    }

    fn disconnect_observer(&mut self, handle: ObserverHandle) {
        let before = self.observers.len();
        self.observers.retain(|o| *o != handle);
        if self.observers.len() < before {
            self.stats.observers_disconnected += 1;
        }
    }
}

/// What happened during one [`Simulation::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub at_ms: f64,
    /// Frame callbacks run this tick (0 or 1 in a well-behaved loop).
    pub frames_run: u32,
    pub drawn: bool,
    /// Frame requests issued while handling this tick.
    pub requests: u64,
}

/// A headless host driving one mounted backdrop.
#[derive(Debug)]
pub struct Simulation<C> {
    pub host: HeadlessHost<C>,
    pub backdrop: Backdrop<C>,
}

impl<C: DrawingContext + Clone> Simulation<C> {
    /// Mount a backdrop on `host` at the host's current time.
    pub fn mount(mut host: HeadlessHost<C>, options: BackdropOptions) -> Self {
        let backdrop = Backdrop::mount(&mut host, options);
        Self { host, backdrop }
    }

    /// Deliver an event the way a browser would: only if someone listens.
    pub fn dispatch(&mut self, event: HostEvent) -> bool {
        if !self.host.delivers(&event) {
            return false;
        }
        self.backdrop.handle_event(&mut self.host, event);
        true
    }

    /// Apply one scripted action at the current time.
    pub fn apply(&mut self, action: &ScriptAction) {
        match *action {
            ScriptAction::Pointer { x, y } => {
                self.dispatch(HostEvent::PointerMove { x, y });
            }
            ScriptAction::Touch { x, y } => {
                self.dispatch(HostEvent::TouchMove { x, y });
            }
            ScriptAction::Resize { width, height, dpr } => {
                for event in self.host.resize(Rect::sized(width, height), dpr) {
                    self.dispatch(event);
                }
            }
            ScriptAction::ReducedMotion { enabled } => {
                self.host.set_reduced_motion(enabled);
                self.dispatch(HostEvent::MotionPreference { reduced: enabled });
            }
        }
    }

    /// Advance the clock to `at_ms` and run the frame callbacks that were
    /// pending at the start of the tick.
    pub fn tick(&mut self, at_ms: f64) -> TickReport {
        self.host.set_time(at_ms);
        let requests_before = self.host.stats().frame_requests;
        let due = self.host.pending_frames();
        let mut report = TickReport {
            at_ms,
            ..TickReport::default()
        };
        for _ in 0..due {
            let Some(handle) = self.host.take_frame() else {
                break;
            };
            report.frames_run += 1;
            if self.backdrop.on_frame(&mut self.host, handle) == FrameOutcome::Drawn {
                report.drawn = true;
            }
        }
        report.requests = self.host.stats().frame_requests - requests_before;
        report
    }

    /// Replay `script` for `duration_ms` at `fps`, calling `on_tick` after
    /// every tick.
    pub fn run(
        &mut self,
        script: &Script,
        duration_ms: f64,
        fps: u32,
        mut on_tick: impl FnMut(u64, &TickReport, &Backdrop<C>),
    ) {
        let frame_ms = 1000.0 / fps.max(1) as f64;
        let start = self.host.now_ms();
        let mut events = script.events.iter().peekable();
        let mut index: u64 = 0;
        loop {
            let at = start + index as f64 * frame_ms;
            if at > start + duration_ms {
                break;
            }
            while let Some(event) = events.next_if(|e| start + e.at_ms <= at) {
                self.host.set_time(start + event.at_ms);
                self.apply(&event.action);
            }
            let report = self.tick(at);
            on_tick(index, &report, &self.backdrop);
            index += 1;
        }
    }
}
