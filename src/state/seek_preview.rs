// Seek preview overlay: live target time while a drag is active
use std::rc::Rc;

use crate::model::{clamp_target, SeekDirection, SeekPreview};
use crate::surface::RenderPort;
use crate::util::{format_clock, format_signed_seconds};

pub fn build_preview(delta_seconds: f64, current: f64, duration: f64) -> SeekPreview {
    let target = clamp_target(current, delta_seconds, duration);
    SeekPreview {
        target_seconds: target,
        delta_seconds,
        direction: if delta_seconds < 0.0 { SeekDirection::Backward } else { SeekDirection::Forward },
        target_label: format_clock(target),
        magnitude_label: format_signed_seconds(delta_seconds),
    }
}

pub struct SeekPreviewRenderer<H> {
    port: Rc<dyn RenderPort<SeekPreview>>,
    visible: bool,
    hide_timer: Option<(u64, H)>,
    next_token: u64,
}

impl<H> SeekPreviewRenderer<H> {
    pub fn new(port: Rc<dyn RenderPort<SeekPreview>>) -> Self {
        Self { port, visible: false, hide_timer: None, next_token: 0 }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_timer.is_some()
    }

    /// Renders the clamped target for a live drag delta. A pending delayed hide is
    /// cancelled so a fresh drag is never blanked by the previous one's timer.
    pub fn preview(&mut self, delta_seconds: f64, current: f64, duration: f64) -> SeekPreview {
        self.hide_timer = None;
        let preview = build_preview(delta_seconds, current, duration);
        self.port.render(Some(&preview));
        self.visible = true;
        preview
    }

    /// Idempotent: only a visible overlay is re-rendered as empty.
    pub fn clear(&mut self) {
        self.hide_timer = None;
        if self.visible {
            self.port.render(None);
            self.visible = false;
        }
    }

    /// Arms the post-drag hide; replaces an earlier one.
    pub fn schedule_clear(&mut self, arm: impl FnOnce(u64) -> H) {
        self.hide_timer = None;
        self.next_token += 1;
        let token = self.next_token;
        self.hide_timer = Some((token, arm(token)));
    }

    pub fn fire_clear(&mut self, token: u64) {
        if matches!(self.hide_timer, Some((t, _)) if t == token) {
            self.clear();
        }
    }

    /// Forgets the overlay without rendering; the surface may already be gone.
    pub fn detach(&mut self) {
        self.hide_timer = None;
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Frames = Rc<RefCell<Vec<Option<SeekPreview>>>>;

    fn renderer() -> (SeekPreviewRenderer<u64>, Frames) {
        let frames: Frames = Rc::new(RefCell::new(Vec::new()));
        let sink = frames.clone();
        let port: Rc<dyn RenderPort<SeekPreview>> =
            Rc::new(move |c: Option<&SeekPreview>| sink.borrow_mut().push(c.cloned()));
        (SeekPreviewRenderer::new(port), frames)
    }

    #[test]
    fn preview_shows_clamped_target() {
        let (mut r, frames) = renderer();
        let p = r.preview(20.0, 50.0, 600.0);
        assert_eq!(p.target_seconds, 70.0);
        assert_eq!(p.target_label, "01:10");
        assert_eq!(p.magnitude_label, "+20s");
        assert_eq!(p.direction, SeekDirection::Forward);
        assert!(r.is_visible());
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn backward_preview_never_goes_negative() {
        let p = build_preview(-30.0, 12.0, 600.0);
        assert_eq!(p.target_seconds, 0.0);
        assert_eq!(p.direction, SeekDirection::Backward);
        assert_eq!(p.magnitude_label, "-30s");
    }

    #[test]
    fn clear_is_idempotent() {
        let (mut r, frames) = renderer();
        r.clear();
        assert!(frames.borrow().is_empty());
        r.preview(5.0, 0.0, 10.0);
        r.clear();
        r.clear();
        assert_eq!(frames.borrow().len(), 2);
        assert_eq!(frames.borrow()[1], None);
    }

    #[test]
    fn stale_hide_token_is_ignored() {
        let (mut r, _frames) = renderer();
        r.preview(5.0, 0.0, 10.0);
        r.schedule_clear(|t| t);
        r.preview(6.0, 0.0, 10.0);
        assert!(!r.hide_pending());
        r.fire_clear(1);
        assert!(r.is_visible());
        r.schedule_clear(|t| t);
        r.fire_clear(2);
        assert!(!r.is_visible());
    }
}
