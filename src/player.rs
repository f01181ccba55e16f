//! Playback capability consumed by the gesture controller, plus the
//! `<video>`-backed implementation used in the browser.

use std::rc::{Rc, Weak};

use web_sys::{Element, HtmlVideoElement};

/// The minimal playback surface the controller drives. Times are in seconds.
pub trait Player {
    fn play(&self);
    fn pause(&self);
    fn paused(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn duration(&self) -> f64;
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&self);
    fn exit_fullscreen(&self);
}

/// Drives an `HtmlVideoElement`; fullscreen targets the surrounding container so
/// the touch layer and overlays stay visible.
pub struct VideoElementPlayer {
    video: HtmlVideoElement,
    container: Element,
}

impl VideoElementPlayer {
    pub fn new(video: HtmlVideoElement, container: Element) -> Self {
        Self { video, container }
    }
}

impl Player for VideoElementPlayer {
    fn play(&self) {
        // the returned promise rejects on autoplay policy; nothing to recover
        if let Err(err) = self.video.play() {
            log::warn!("video play() failed: {:?}", err);
        }
    }

    fn pause(&self) {
        if let Err(err) = self.video.pause() {
            log::warn!("video pause() failed: {:?}", err);
        }
    }

    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn is_fullscreen(&self) -> bool {
        self.container
            .owner_document()
            .and_then(|doc| doc.fullscreen_element())
            .is_some()
    }

    fn request_fullscreen(&self) {
        if let Err(err) = self.container.request_fullscreen() {
            log::warn!("requestFullscreen failed: {:?}", err);
        }
    }

    fn exit_fullscreen(&self) {
        if let Some(doc) = self.container.owner_document() {
            doc.exit_fullscreen();
        }
    }
}

/// Read-only time probe handed to the host page (e.g. for timestamping notes).
/// Holds the player weakly; reads `0.0` once the player is gone.
#[derive(Clone)]
pub struct PlaybackClock {
    player: Weak<dyn Player>,
}

impl PlaybackClock {
    pub fn new(player: &Rc<dyn Player>) -> Self {
        Self { player: Rc::downgrade(player) }
    }

    pub fn current_time(&self) -> f64 {
        self.player
            .upgrade()
            .map(|p| p.current_time())
            .filter(|t| t.is_finite())
            .unwrap_or(0.0)
    }
}

impl PartialEq for PlaybackClock {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.player, &other.player)
    }
}
