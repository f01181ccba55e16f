// Per-player gesture scratchpad, owned by the classifier
use crate::model::TouchPoint;

/// A single-tap grace timer. `token` identifies which tap armed it, so a
/// late callback for a replaced timer can be recognised and ignored.
pub struct PendingTap<H> {
    pub token: u64,
    _timer: H,
}

/// Tracks one touch lifecycle (start..end) plus the tap memory that has to
/// outlive it for double-tap detection.
pub struct GestureSession<H> {
    pub start_point: TouchPoint,
    pub last_point: TouchPoint,
    pub start_time: f64,
    pub drag_active: bool,
    /// A contact is down and not yet resolved.
    pub in_flight: bool,
    pub pending_tap: Option<PendingTap<H>>,
    pub last_tap_time: Option<f64>,
}

impl<H> Default for GestureSession<H> {
    fn default() -> Self {
        let origin = TouchPoint::new(0.0, 0.0, 0.0);
        Self {
            start_point: origin,
            last_point: origin,
            start_time: 0.0,
            drag_active: false,
            in_flight: false,
            pending_tap: None,
            last_tap_time: None,
        }
    }
}

impl<H> GestureSession<H> {
    pub fn begin(&mut self, point: TouchPoint) {
        self.start_point = point;
        self.last_point = point;
        self.start_time = point.t;
        self.drag_active = false;
        self.in_flight = true;
    }

    /// Ends the current lifecycle; tap memory is kept.
    pub fn finish_contact(&mut self) {
        self.in_flight = false;
        self.drag_active = false;
    }

    /// Replaces any armed grace timer; the old handle is dropped (cancelled) first.
    pub fn arm_tap(&mut self, token: u64, timer: H) {
        self.cancel_tap();
        self.pending_tap = Some(PendingTap { token, _timer: timer });
    }

    pub fn cancel_tap(&mut self) -> bool {
        self.pending_tap.take().is_some()
    }

    /// Consumes the pending tap if `token` still names it.
    pub fn take_tap(&mut self, token: u64) -> bool {
        match &self.pending_tap {
            Some(p) if p.token == token => {
                self.pending_tap = None;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
