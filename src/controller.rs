//! Gesture controller: wires normalizer -> classifier -> {seek preview, dispatcher -> player,
//! feedback flashes} for one player instance.
//!
//! All state sits behind one `Rc<RefCell<..>>`. Timer callbacks hold only a `Weak`
//! reference and re-check the liveness flag, so nothing scheduled before
//! [`GestureController::detach`] can reach the player or a surface afterwards.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::GestureConfig;
use crate::model::{FeedbackEvent, PlaybackCommand, Primitive, SeekPreview};
use crate::player::{PlaybackClock, Player};
use crate::state::{
    ActionDispatcher, FeedbackPresenter, GestureClassifier, RawPhase, RawTouch, Resolution,
    SeekPreviewRenderer, Step, TouchNormalizer,
};
use crate::surface::RenderPort;
use crate::timer::Scheduler;

/// The two overlay regions the host renders.
#[derive(Clone)]
pub struct Surfaces {
    pub seek: Rc<dyn RenderPort<SeekPreview>>,
    pub flash: Rc<dyn RenderPort<[FeedbackEvent]>>,
}

impl Surfaces {
    /// Blanks both regions. For hosts that keep the surfaces mounted across a
    /// detach/attach cycle; [`GestureController::detach`] never renders.
    pub fn clear(&self) {
        self.seek.render(None);
        self.flash.render(None);
    }
}

struct Core<S: Scheduler> {
    cfg: GestureConfig,
    alive: bool,
    weak_self: Weak<RefCell<Core<S>>>,
    player: Option<Rc<dyn Player>>,
    scheduler: S,
    normalizer: TouchNormalizer,
    classifier: GestureClassifier<S::Handle>,
    dispatcher: ActionDispatcher,
    seek: SeekPreviewRenderer<S::Handle>,
    flashes: FeedbackPresenter<S::Handle>,
}

/// Schedules `action(core, token)`; the callback is a no-op once the core is
/// dropped, busy, or detached.
fn arm<S: Scheduler + 'static>(
    scheduler: &S,
    weak_self: &Weak<RefCell<Core<S>>>,
    delay_ms: u32,
    token: u64,
    action: fn(&mut Core<S>, u64),
) -> S::Handle {
    let weak = weak_self.clone();
    scheduler.schedule(
        delay_ms,
        Box::new(move || {
            let Some(core) = weak.upgrade() else { return };
            let Ok(mut core) = core.try_borrow_mut() else { return };
            if core.alive {
                action(&mut *core, token);
            }
        }),
    )
}

impl<S: Scheduler + 'static> Core<S> {
    fn handle(&mut self, p: Primitive, surface_width: f64) -> bool {
        let Core { ref mut classifier, ref scheduler, ref weak_self, ref cfg, .. } = *self;
        let grace_ms = cfg.double_tap_window_ms.max(0.0) as u32;
        let step = classifier.handle(p, surface_width, |token| {
            arm(scheduler, weak_self, grace_ms, token, Self::on_tap_timer)
        });

        match step {
            Step::Ignored | Step::TapDeferred => false,
            Step::Began { superseded_drag } => {
                if superseded_drag {
                    self.seek.clear();
                }
                false
            }
            Step::DragPreview { delta_seconds } => {
                let Some(player) = self.player.clone() else { return false };
                let preview = self.seek.preview(delta_seconds, player.current_time(), player.duration());
                log::debug!("gesture: {:?}", PlaybackCommand::SeekAbsolutePreview(preview.target_seconds));
                true
            }
            Step::Resolved(resolution) => {
                log::debug!("gesture: resolved {:?}", resolution);
                let dragging = matches!(resolution, Resolution::Drag { .. });
                self.dispatch(resolution);
                if dragging {
                    self.schedule_seek_hide();
                }
                dragging
            }
            Step::LongPress => {
                log::debug!("gesture: long press ignored");
                false
            }
            Step::Cancelled { was_dragging } => {
                if was_dragging {
                    self.seek.clear();
                }
                false
            }
        }
    }

    fn dispatch(&mut self, resolution: Resolution) {
        let Some(player) = self.player.clone() else { return };
        let out = self.dispatcher.dispatch(resolution, player.as_ref());
        log::debug!("gesture: issued {:?}", out.command);
        if let Some(kind) = out.feedback {
            let Core { ref mut flashes, ref scheduler, ref weak_self, ref cfg, .. } = *self;
            let now = scheduler.now();
            let ms = cfg.flash_duration_ms;
            flashes.flash(kind, now, |id| arm(scheduler, weak_self, ms, id, Self::on_flash_expired));
        }
    }

    fn schedule_seek_hide(&mut self) {
        let Core { ref mut seek, ref scheduler, ref weak_self, ref cfg, .. } = *self;
        let ms = cfg.seek_overlay_clear_ms;
        seek.schedule_clear(|token| arm(scheduler, weak_self, ms, token, Self::on_seek_hide));
    }

    fn on_tap_timer(&mut self, token: u64) {
        if let Some(resolution) = self.classifier.fire_single_tap(token) {
            log::debug!("gesture: resolved {:?}", resolution);
            self.dispatch(resolution);
        }
    }

    fn on_seek_hide(&mut self, token: u64) {
        self.seek.fire_clear(token);
    }

    fn on_flash_expired(&mut self, id: u64) {
        self.flashes.expire(id);
    }

    fn detach(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.classifier.reset();
        self.seek.detach();
        self.flashes.detach();
        self.normalizer.reset();
        self.player = None;
        log::info!("gesture controller detached");
    }
}

pub struct GestureController<S: Scheduler + 'static> {
    core: Rc<RefCell<Core<S>>>,
}

impl<S: Scheduler + 'static> GestureController<S> {
    pub fn attach(player: Rc<dyn Player>, surfaces: Surfaces, scheduler: S, cfg: GestureConfig) -> Self {
        let core = Rc::new_cyclic(|weak_self| {
            RefCell::new(Core {
                classifier: GestureClassifier::new(cfg.clone()),
                dispatcher: ActionDispatcher::new(cfg.seek_step_seconds),
                seek: SeekPreviewRenderer::new(surfaces.seek),
                flashes: FeedbackPresenter::new(surfaces.flash),
                normalizer: TouchNormalizer::new(),
                weak_self: weak_self.clone(),
                player: Some(player),
                alive: true,
                scheduler,
                cfg,
            })
        });
        log::info!("gesture controller attached");
        Self { core }
    }

    /// Feeds one raw platform touch event. Returns `true` when the host should
    /// `preventDefault` (a horizontal drag owns the gesture).
    pub fn handle_touch(&self, phase: RawPhase, active: &[RawTouch], changed: &[RawTouch], t: f64, surface_width: f64) -> bool {
        let Ok(mut core) = self.core.try_borrow_mut() else { return false };
        if !core.alive {
            return false;
        }
        match core.normalizer.normalize(phase, active, changed, t) {
            Some(p) => core.handle(p, surface_width),
            None => {
                log::debug!("gesture: dropped {:?} event", phase);
                false
            }
        }
    }

    /// Feeds an already normalized primitive.
    pub fn handle_primitive(&self, p: Primitive, surface_width: f64) -> bool {
        let Ok(mut core) = self.core.try_borrow_mut() else { return false };
        if !core.alive {
            return false;
        }
        core.handle(p, surface_width)
    }

    pub fn is_dragging(&self) -> bool {
        self.core.borrow().classifier.is_dragging()
    }

    pub fn is_attached(&self) -> bool {
        self.core.borrow().alive
    }

    pub fn clock(&self) -> Option<PlaybackClock> {
        self.core.borrow().player.as_ref().map(PlaybackClock::new)
    }

    /// Cancels every timer and releases the player. Safe to call repeatedly.
    pub fn detach(&self) {
        if let Ok(mut core) = self.core.try_borrow_mut() {
            core.detach();
        }
    }
}

impl<S: Scheduler + 'static> Drop for GestureController<S> {
    fn drop(&mut self) {
        self.detach();
    }
}
