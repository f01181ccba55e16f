//! Touch gesture playback controller for a web video player.
//!
//! Single tap toggles play/pause, double tap seeks or toggles fullscreen by
//! zone, and a horizontal drag scrubs with a live preview.

pub mod components;
pub mod config;
pub mod controller;
pub mod model;
pub mod player;
pub mod state;
pub mod surface;
pub mod timer;
pub mod util;

pub use config::{ConfigError, GestureConfig};
pub use controller::{GestureController, Surfaces};
pub use model::{FeedbackEvent, FeedbackKind, PlaybackCommand, Primitive, SeekPreview, TouchPoint, Zone};
pub use player::{PlaybackClock, Player};
pub use surface::RenderPort;
pub use timer::{BrowserScheduler, ManualScheduler, Scheduler};
