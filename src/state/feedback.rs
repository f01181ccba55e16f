// Auto-expiring icon flashes for discrete actions
use std::rc::Rc;

use crate::model::{FeedbackEvent, FeedbackKind};
use crate::surface::RenderPort;

struct ActiveFlash<H> {
    event: FeedbackEvent,
    _expiry: H,
}

/// Append/auto-expire list of flashes. Each flash owns its own expiry timer, so
/// concurrent flashes never shorten each other.
pub struct FeedbackPresenter<H> {
    port: Rc<dyn RenderPort<[FeedbackEvent]>>,
    active: Vec<ActiveFlash<H>>,
    next_id: u64,
}

impl<H> FeedbackPresenter<H> {
    pub fn new(port: Rc<dyn RenderPort<[FeedbackEvent]>>) -> Self {
        Self { port, active: Vec::new(), next_id: 0 }
    }

    pub fn active(&self) -> Vec<FeedbackEvent> {
        self.active.iter().map(|f| f.event).collect()
    }

    /// `arm` receives the new flash id and returns the expiry timer handle.
    pub fn flash(&mut self, kind: FeedbackKind, now: f64, arm: impl FnOnce(u64) -> H) -> FeedbackEvent {
        self.next_id += 1;
        let event = FeedbackEvent { id: self.next_id, kind, created_at: now };
        let expiry = arm(event.id);
        self.active.push(ActiveFlash { event, _expiry: expiry });
        self.render();
        event
    }

    pub fn expire(&mut self, id: u64) {
        let before = self.active.len();
        self.active.retain(|f| f.event.id != id);
        if self.active.len() != before {
            self.render();
        }
    }

    /// Drops all expiry timers without rendering.
    pub fn detach(&mut self) {
        self.active.clear();
    }

    fn render(&self) {
        if self.active.is_empty() {
            self.port.render(None);
        } else {
            let events = self.active();
            self.port.render(Some(events.as_slice()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Frames = Rc<RefCell<Vec<Vec<FeedbackKind>>>>;

    fn presenter() -> (FeedbackPresenter<u64>, Frames) {
        let frames: Frames = Rc::new(RefCell::new(Vec::new()));
        let sink = frames.clone();
        let port: Rc<dyn RenderPort<[FeedbackEvent]>> = Rc::new(move |c: Option<&[FeedbackEvent]>| {
            sink.borrow_mut().push(c.map(|evs| evs.iter().map(|e| e.kind).collect()).unwrap_or_default())
        });
        (FeedbackPresenter::new(port), frames)
    }

    #[test]
    fn flashes_stack_and_expire_independently() {
        let (mut p, frames) = presenter();
        let a = p.flash(FeedbackKind::Left, 0.0, |id| id);
        let b = p.flash(FeedbackKind::Left, 100.0, |id| id);
        assert_ne!(a.id, b.id);
        assert_eq!(p.active().len(), 2);
        p.expire(a.id);
        assert_eq!(p.active(), vec![b]);
        p.expire(b.id);
        assert!(p.active().is_empty());
        assert_eq!(
            *frames.borrow(),
            vec![vec![FeedbackKind::Left], vec![FeedbackKind::Left, FeedbackKind::Left], vec![FeedbackKind::Left], vec![]]
        );
    }

    #[test]
    fn unknown_expiry_does_not_render() {
        let (mut p, frames) = presenter();
        p.expire(42);
        assert!(frames.borrow().is_empty());
    }
}
