//! Gesture classifier.
//!
//! Consumes normalized primitives and decides, per lifecycle, between drag-seek,
//! tap, double-tap and long-press. A tap that could still become a double-tap is
//! deferred behind a grace timer whose handle lives in the session; the caller
//! supplies the timer through the `arm` closure and reports it back with
//! [`GestureClassifier::fire_single_tap`].
//!
//! Once a lifecycle has crossed into `Dragging` it stays a drag until its end,
//! even if the finger returns under the threshold.

use crate::config::GestureConfig;
use crate::model::{Primitive, PrimitiveKind, TouchPoint, Zone};
use crate::state::session::GestureSession;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    SingleTap,
    DoubleTap(Zone),
    Drag { delta_seconds: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Ignored,
    /// New lifecycle. `superseded_drag` is set when an unfinished drag was discarded.
    Began { superseded_drag: bool },
    /// Live preview value while dragging (also emitted on the move that starts the drag).
    DragPreview { delta_seconds: f64 },
    Resolved(Resolution),
    /// Single-tap candidate; a grace timer was armed.
    TapDeferred,
    LongPress,
    Cancelled { was_dragging: bool },
}

pub struct GestureClassifier<H> {
    cfg: GestureConfig,
    session: GestureSession<H>,
    next_token: u64,
}

impl<H> GestureClassifier<H> {
    pub fn new(cfg: GestureConfig) -> Self {
        Self { cfg, session: GestureSession::default(), next_token: 0 }
    }

    pub fn session(&self) -> &GestureSession<H> {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.in_flight && self.session.drag_active
    }

    /// `surface_width` is the touch layer width; only used to pick the double-tap zone.
    pub fn handle(&mut self, p: Primitive, surface_width: f64, arm: impl FnOnce(u64) -> H) -> Step {
        if !p.point.is_finite() && p.kind != PrimitiveKind::Cancel {
            return Step::Ignored;
        }
        match p.kind {
            PrimitiveKind::Start => self.on_start(p.point),
            PrimitiveKind::Move => self.on_move(p.point),
            PrimitiveKind::End => self.on_end(p.point, surface_width, arm),
            PrimitiveKind::Cancel => self.on_cancel(),
        }
    }

    fn on_start(&mut self, point: TouchPoint) -> Step {
        let superseded_drag = self.session.in_flight && self.session.drag_active;
        if self.session.in_flight {
            log::debug!("gesture: unresolved lifecycle superseded by new start");
        }
        self.session.begin(point);
        Step::Began { superseded_drag }
    }

    fn on_move(&mut self, point: TouchPoint) -> Step {
        if !self.session.in_flight {
            return Step::Ignored;
        }
        self.session.last_point = point;
        let dx = point.x - self.session.start_point.x;
        let dy = point.y - self.session.start_point.y;
        if !self.session.drag_active {
            if dx.abs() > self.cfg.drag_threshold_px && dx.abs() > dy.abs() {
                self.session.drag_active = true;
                // a drag breaks any tap chain in progress
                if self.session.cancel_tap() {
                    log::debug!("gesture: drag cancelled pending single tap");
                }
                self.session.last_tap_time = None;
            } else {
                return Step::Ignored;
            }
        }
        Step::DragPreview { delta_seconds: dx * self.cfg.seconds_per_px }
    }

    fn on_end(&mut self, point: TouchPoint, surface_width: f64, arm: impl FnOnce(u64) -> H) -> Step {
        if !self.session.in_flight {
            return Step::Ignored;
        }
        let dragging = self.session.drag_active;
        let start = self.session.start_point;
        let start_time = self.session.start_time;
        self.session.last_point = point;
        self.session.finish_contact();

        if dragging {
            let dx = point.x - start.x;
            return Step::Resolved(Resolution::Drag { delta_seconds: dx * self.cfg.seconds_per_px });
        }

        if point.t - start_time > self.cfg.tap_max_ms {
            return Step::LongPress;
        }

        let since_last = self.session.last_tap_time.map(|last| point.t - last);
        match since_last {
            Some(gap) if gap > 0.0 && gap < self.cfg.double_tap_window_ms => {
                self.session.cancel_tap();
                self.session.last_tap_time = None;
                let zone = Zone::from_x(
                    point.x,
                    surface_width,
                    self.cfg.left_zone_fraction,
                    self.cfg.right_zone_fraction,
                );
                Step::Resolved(Resolution::DoubleTap(zone))
            }
            _ => {
                self.session.last_tap_time = Some(point.t);
                self.next_token += 1;
                let token = self.next_token;
                let timer = arm(token);
                self.session.arm_tap(token, timer);
                Step::TapDeferred
            }
        }
    }

    fn on_cancel(&mut self) -> Step {
        if !self.session.in_flight {
            return Step::Ignored;
        }
        let was_dragging = self.session.drag_active;
        self.session.finish_contact();
        Step::Cancelled { was_dragging }
    }

    /// Grace timer callback. Returns the deferred tap only if `token` is still armed.
    /// A fired tap is spent: it can no longer pair into a double tap.
    pub fn fire_single_tap(&mut self, token: u64) -> Option<Resolution> {
        if self.session.take_tap(token) {
            self.session.last_tap_time = None;
            Some(Resolution::SingleTap)
        } else {
            None
        }
    }

    /// Drops every timer handle and forgets all state.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 1000.0;

    fn classifier() -> GestureClassifier<u64> {
        GestureClassifier::new(GestureConfig::default())
    }

    fn feed(c: &mut GestureClassifier<u64>, p: Primitive) -> Step {
        c.handle(p, W, |token| token)
    }

    fn tap(c: &mut GestureClassifier<u64>, x: f64, t: f64) -> Step {
        feed(c, Primitive::start(x, 100.0, t));
        feed(c, Primitive::end(x + 2.0, 101.0, t + 60.0))
    }

    #[test]
    fn lone_tap_is_deferred_then_fires_once() {
        let mut c = classifier();
        assert_eq!(tap(&mut c, 500.0, 0.0), Step::TapDeferred);
        let token = c.session().pending_tap.as_ref().map(|p| p.token).unwrap();
        assert_eq!(c.fire_single_tap(token), Some(Resolution::SingleTap));
        assert_eq!(c.fire_single_tap(token), None);
    }

    #[test]
    fn fired_tap_does_not_pair_with_late_second_tap() {
        let mut c = classifier();
        tap(&mut c, 50.0, 0.0);
        let token = c.session().pending_tap.as_ref().map(|p| p.token).unwrap();
        assert_eq!(c.fire_single_tap(token), Some(Resolution::SingleTap));
        assert_eq!(c.session().last_tap_time, None);
        // timestamp still inside the window of the tap that already resolved
        assert_eq!(tap(&mut c, 50.0, 200.0), Step::TapDeferred);
    }

    #[test]
    fn second_tap_inside_window_is_double_tap() {
        let mut c = classifier();
        tap(&mut c, 50.0, 0.0);
        let first = c.session().pending_tap.as_ref().map(|p| p.token).unwrap();
        assert_eq!(tap(&mut c, 50.0, 190.0), Step::Resolved(Resolution::DoubleTap(Zone::Left)));
        assert!(c.session().pending_tap.is_none());
        assert_eq!(c.fire_single_tap(first), None);
        assert_eq!(c.session().last_tap_time, None);
    }

    #[test]
    fn second_tap_after_window_is_a_new_single_tap() {
        let mut c = classifier();
        tap(&mut c, 500.0, 0.0);
        assert_eq!(tap(&mut c, 500.0, 400.0), Step::TapDeferred);
    }

    #[test]
    fn zone_follows_end_point() {
        let mut c = classifier();
        tap(&mut c, 900.0, 0.0);
        assert_eq!(tap(&mut c, 900.0, 150.0), Step::Resolved(Resolution::DoubleTap(Zone::Right)));
        tap(&mut c, 500.0, 1000.0);
        assert_eq!(tap(&mut c, 500.0, 1150.0), Step::Resolved(Resolution::DoubleTap(Zone::Center)));
    }

    #[test]
    fn long_press_is_a_no_op() {
        let mut c = classifier();
        feed(&mut c, Primitive::start(500.0, 100.0, 0.0));
        assert_eq!(feed(&mut c, Primitive::end(500.0, 100.0, 301.0)), Step::LongPress);
        assert!(c.session().pending_tap.is_none());
    }

    #[test]
    fn horizontal_move_past_threshold_starts_drag() {
        let mut c = classifier();
        feed(&mut c, Primitive::start(100.0, 100.0, 0.0));
        assert_eq!(feed(&mut c, Primitive::moved(115.0, 100.0, 10.0)), Step::Ignored);
        assert_eq!(
            feed(&mut c, Primitive::moved(150.0, 105.0, 20.0)),
            Step::DragPreview { delta_seconds: 50.0 * 0.2 }
        );
        assert!(c.is_dragging());
        assert_eq!(
            feed(&mut c, Primitive::end(200.0, 105.0, 40.0)),
            Step::Resolved(Resolution::Drag { delta_seconds: 100.0 * 0.2 })
        );
        assert!(!c.is_dragging());
    }

    #[test]
    fn drag_never_reverts_to_tap() {
        let mut c = classifier();
        feed(&mut c, Primitive::start(100.0, 100.0, 0.0));
        feed(&mut c, Primitive::moved(130.0, 100.0, 10.0));
        feed(&mut c, Primitive::moved(102.0, 100.0, 20.0));
        let step = feed(&mut c, Primitive::end(101.0, 100.0, 30.0));
        assert!(matches!(step, Step::Resolved(Resolution::Drag { .. })));
        assert!(c.session().pending_tap.is_none());
    }

    #[test]
    fn vertical_dominant_move_never_drags() {
        let mut c = classifier();
        feed(&mut c, Primitive::start(100.0, 100.0, 0.0));
        assert_eq!(feed(&mut c, Primitive::moved(130.0, 140.0, 10.0)), Step::Ignored);
        assert_eq!(feed(&mut c, Primitive::moved(130.0, 130.0, 12.0)), Step::Ignored);
        assert!(!c.is_dragging());
    }

    #[test]
    fn drag_cancels_pending_single_tap() {
        let mut c = classifier();
        tap(&mut c, 500.0, 0.0);
        feed(&mut c, Primitive::start(500.0, 100.0, 100.0));
        feed(&mut c, Primitive::moved(560.0, 100.0, 120.0));
        assert!(c.session().pending_tap.is_none());
        assert_eq!(c.session().last_tap_time, None);
    }

    #[test]
    fn restart_mid_drag_reports_superseded_drag() {
        let mut c = classifier();
        feed(&mut c, Primitive::start(100.0, 100.0, 0.0));
        feed(&mut c, Primitive::moved(160.0, 100.0, 10.0));
        assert_eq!(
            feed(&mut c, Primitive::start(300.0, 100.0, 20.0)),
            Step::Began { superseded_drag: true }
        );
        assert!(!c.is_dragging());
    }

    #[test]
    fn cancel_discards_without_resolution() {
        let mut c = classifier();
        feed(&mut c, Primitive::start(100.0, 100.0, 0.0));
        feed(&mut c, Primitive::moved(160.0, 100.0, 10.0));
        assert_eq!(
            feed(&mut c, Primitive::cancel(0.0, 0.0, 12.0)),
            Step::Cancelled { was_dragging: true }
        );
        assert_eq!(feed(&mut c, Primitive::end(170.0, 100.0, 14.0)), Step::Ignored);
    }

    #[test]
    fn stray_move_and_end_without_start_are_ignored() {
        let mut c = classifier();
        assert_eq!(feed(&mut c, Primitive::moved(10.0, 10.0, 0.0)), Step::Ignored);
        assert_eq!(feed(&mut c, Primitive::end(10.0, 10.0, 1.0)), Step::Ignored);
        assert_eq!(feed(&mut c, Primitive::start(f64::NAN, 10.0, 2.0)), Step::Ignored);
    }
}
