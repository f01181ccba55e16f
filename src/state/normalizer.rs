// Raw touch events -> start/move/end primitives, first contact only
use web_sys::{TouchEvent, TouchList};

use crate::model::{Primitive, PrimitiveKind, TouchPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One platform contact, in coordinates relative to the touch layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawTouch {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

impl RawTouch {
    fn usable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Remembers which contact is being followed so extra fingers never start,
/// move or end a gesture.
#[derive(Default, Debug, Clone)]
pub struct TouchNormalizer {
    tracked: Option<i32>,
}

impl TouchNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracked(&self) -> Option<i32> {
        self.tracked
    }

    /// `active` is the list of contacts still down (`touches`), `changed` the contacts
    /// this event is about (`changedTouches`).
    pub fn normalize(&mut self, phase: RawPhase, active: &[RawTouch], changed: &[RawTouch], t: f64) -> Option<Primitive> {
        if !t.is_finite() {
            return None;
        }
        match phase {
            RawPhase::Start => {
                if let Some(id) = self.tracked {
                    if active.iter().any(|c| c.id == id) {
                        // second finger while the first is still down
                        return None;
                    }
                }
                let first = changed.first().or_else(|| active.first())?;
                if !first.usable() {
                    return None;
                }
                self.tracked = Some(first.id);
                Some(Primitive::start(first.x, first.y, t))
            }
            RawPhase::Move => {
                let id = self.tracked?;
                let contact = active.iter().chain(changed).find(|c| c.id == id)?;
                if !contact.usable() {
                    return None;
                }
                Some(Primitive::moved(contact.x, contact.y, t))
            }
            RawPhase::End | RawPhase::Cancel => {
                let id = self.tracked?;
                let contact = changed.iter().find(|c| c.id == id)?;
                self.tracked = None;
                if phase == RawPhase::Cancel || !contact.usable() {
                    // an end we cannot place is resolved as a cancel
                    return Some(Primitive {
                        kind: PrimitiveKind::Cancel,
                        point: TouchPoint::new(0.0, 0.0, t),
                    });
                }
                Some(Primitive::end(contact.x, contact.y, t))
            }
        }
    }

    pub fn reset(&mut self) {
        self.tracked = None;
    }
}

fn collect(list: &TouchList, left: f64, top: f64) -> Vec<RawTouch> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|touch| RawTouch {
            id: touch.identifier(),
            x: touch.client_x() as f64 - left,
            y: touch.client_y() as f64 - top,
        })
        .collect()
}

/// Splits a browser `TouchEvent` into (active, changed) contact lists relative
/// to the layer origin `(left, top)`.
pub fn contacts_from_event(event: &TouchEvent, left: f64, top: f64) -> (Vec<RawTouch>, Vec<RawTouch>) {
    (
        collect(&event.touches(), left, top),
        collect(&event.changed_touches(), left, top),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: i32, x: f64, y: f64) -> RawTouch {
        RawTouch { id, x, y }
    }

    #[test]
    fn single_finger_lifecycle() {
        let mut n = TouchNormalizer::new();
        let down = [touch(7, 10.0, 20.0)];
        let p = n.normalize(RawPhase::Start, &down, &down, 0.0).unwrap();
        assert_eq!(p.kind, PrimitiveKind::Start);
        assert_eq!((p.point.x, p.point.y), (10.0, 20.0));

        let moved = [touch(7, 40.0, 22.0)];
        let p = n.normalize(RawPhase::Move, &moved, &moved, 16.0).unwrap();
        assert_eq!(p.kind, PrimitiveKind::Move);
        assert_eq!(p.point.x, 40.0);

        let up = [touch(7, 45.0, 22.0)];
        let p = n.normalize(RawPhase::End, &[], &up, 40.0).unwrap();
        assert_eq!(p.kind, PrimitiveKind::End);
        assert_eq!(p.point.t, 40.0);
        assert_eq!(n.tracked(), None);
    }

    #[test]
    fn second_finger_is_ignored() {
        let mut n = TouchNormalizer::new();
        n.normalize(RawPhase::Start, &[touch(1, 10.0, 10.0)], &[touch(1, 10.0, 10.0)], 0.0);
        let both = [touch(1, 10.0, 10.0), touch(2, 200.0, 10.0)];
        assert!(n.normalize(RawPhase::Start, &both, &[touch(2, 200.0, 10.0)], 5.0).is_none());

        // second finger moves/lifts: no primitive for it, first finger still followed
        let p = n.normalize(RawPhase::Move, &both, &[touch(2, 250.0, 10.0)], 8.0).unwrap();
        assert_eq!(p.point.x, 10.0);
        assert!(n.normalize(RawPhase::End, &[touch(1, 10.0, 10.0)], &[touch(2, 250.0, 10.0)], 9.0).is_none());
        assert_eq!(n.tracked(), Some(1));
    }

    #[test]
    fn malformed_start_is_dropped() {
        let mut n = TouchNormalizer::new();
        assert!(n.normalize(RawPhase::Start, &[], &[], 0.0).is_none());
        let bad = [touch(3, f64::NAN, 4.0)];
        assert!(n.normalize(RawPhase::Start, &bad, &bad, 0.0).is_none());
        assert!(n.normalize(RawPhase::Move, &bad, &bad, 1.0).is_none());
    }

    #[test]
    fn cancel_and_unplaceable_end_become_cancel() {
        let mut n = TouchNormalizer::new();
        let down = [touch(4, 1.0, 1.0)];
        n.normalize(RawPhase::Start, &down, &down, 0.0);
        let p = n.normalize(RawPhase::Cancel, &[], &down, 3.0).unwrap();
        assert_eq!(p.kind, PrimitiveKind::Cancel);

        n.normalize(RawPhase::Start, &down, &down, 10.0);
        let bad = [touch(4, f64::NAN, 1.0)];
        let p = n.normalize(RawPhase::End, &[], &bad, 12.0).unwrap();
        assert_eq!(p.kind, PrimitiveKind::Cancel);
    }

    #[test]
    fn stale_tracking_is_replaced_by_new_start() {
        let mut n = TouchNormalizer::new();
        n.normalize(RawPhase::Start, &[touch(1, 0.0, 0.0)], &[touch(1, 0.0, 0.0)], 0.0);
        // the end for contact 1 never arrived; a fresh contact takes over
        let p = n.normalize(RawPhase::Start, &[touch(9, 5.0, 5.0)], &[touch(9, 5.0, 5.0)], 50.0);
        assert!(p.is_some());
        assert_eq!(n.tracked(), Some(9));
    }
}
