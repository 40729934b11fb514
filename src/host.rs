//! Host environment abstraction.
//!
//! A backdrop never talks to a window system directly. Everything it needs
//! from its embedding (clock, device pixel ratio, container geometry, the
//! reduced-motion preference, frame scheduling, listener registration,
//! resize observation, and the 2D context itself) goes through [`Host`].
//!
//! Two small owned helpers make teardown deterministic:
//!
//! - [`Subscriptions`]: the list of `(event, listener)` pairs this instance
//!   registered, removed in one pass on unmount.
//! - [`FrameLoop`]: the "request next frame unless stopped" scheduler with a
//!   running flag and the single pending frame handle.

use crate::draw::DrawingContext;
use crate::sizing::Rect;

/// Listener categories a backdrop can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    TouchStart,
    TouchMove,
    WindowResize,
    MotionPreference,
}

impl EventKind {
    /// Pointer-tracking and sizing listeners used by the animated path.
    pub const ANIMATED: [EventKind; 5] = [
        EventKind::PointerMove,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::WindowResize,
        EventKind::MotionPreference,
    ];

    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            EventKind::PointerMove | EventKind::TouchStart | EventKind::TouchMove
        )
    }
}

/// An event delivered to a mounted backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer moved, client coordinates.
    PointerMove { x: f64, y: f64 },
    /// First touch point of a touchstart, client coordinates.
    TouchStart { x: f64, y: f64 },
    /// First touch point of a touchmove, client coordinates.
    TouchMove { x: f64, y: f64 },
    WindowResize,
    /// Delivered by the resize observer, not a listener.
    ContainerResize,
    MotionPreference { reduced: bool },
}

impl HostEvent {
    /// Listener category, or `None` for observer-delivered events.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            HostEvent::PointerMove { .. } => Some(EventKind::PointerMove),
            HostEvent::TouchStart { .. } => Some(EventKind::TouchStart),
            HostEvent::TouchMove { .. } => Some(EventKind::TouchMove),
            HostEvent::WindowResize => Some(EventKind::WindowResize),
            HostEvent::ContainerResize => None,
            HostEvent::MotionPreference { .. } => Some(EventKind::MotionPreference),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(pub u64);

/// The embedding environment of a backdrop.
pub trait Host {
    type Context: DrawingContext;

    /// Monotonic milliseconds.
    fn now_ms(&self) -> f64;

    fn device_pixel_ratio(&self) -> f64;

    /// Container bounding rectangle in client pixels.
    fn container_rect(&self) -> Rect;

    fn prefers_reduced_motion(&self) -> bool;

    /// Acquire the 2D context. `None` when the host cannot provide one.
    fn create_context(&mut self) -> Option<Self::Context>;

    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);

    fn add_listener(&mut self, kind: EventKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);

    fn observe_resize(&mut self) -> ObserverHandle;

    fn disconnect_observer(&mut self, handle: ObserverHandle);
}

/// Listeners registered by one backdrop instance.
#[derive(Debug, Default)]
pub struct Subscriptions {
    listeners: Vec<(EventKind, ListenerId)>,
    observer: Option<ObserverHandle>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen<H: Host>(&mut self, host: &mut H, kind: EventKind) {
        let id = host.add_listener(kind);
        self.listeners.push((kind, id));
    }

    pub fn listen_all<H: Host>(&mut self, host: &mut H, kinds: &[EventKind]) {
        for &kind in kinds {
            self.listen(host, kind);
        }
    }

    pub fn observe<H: Host>(&mut self, host: &mut H) {
        if self.observer.is_none() {
            self.observer = Some(host.observe_resize());
        }
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|(k, _)| *k == kind)
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty() && self.observer.is_none()
    }

    /// Remove every listener and disconnect the observer.
    pub fn clear<H: Host>(&mut self, host: &mut H) {
        for (_, id) in self.listeners.drain(..) {
            host.remove_listener(id);
        }
        if let Some(handle) = self.observer.take() {
            host.disconnect_observer(handle);
        }
    }
}

/// Per-frame scheduler: at most one pending request, and nothing scheduled
/// once stopped.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    pending: Option<FrameHandle>,
    last_frame_ms: Option<f64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Mark running and request the first frame.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        self.running = true;
        self.last_frame_ms = None;
        self.schedule(host);
    }

    /// Request the next frame, unless stopped or one is already pending.
    pub fn schedule<H: Host>(&mut self, host: &mut H) {
        if self.running && self.pending.is_none() {
            self.pending = Some(host.request_frame());
        }
    }

    /// Accept a delivered frame. Returns the elapsed seconds since the
    /// previous frame, or `None` when the frame is stale or the loop stopped.
    pub fn begin(&mut self, handle: FrameHandle, now_ms: f64, max_delta: f64) -> Option<f64> {
        if !self.running || self.pending != Some(handle) {
            return None;
        }
        self.pending = None;
        let delta = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, max_delta),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        Some(delta)
    }

    /// Stop and cancel the pending request.
    pub fn stop<H: Host>(&mut self, host: &mut H) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }
}
