//! Core data types for the touch seek player.
//! Everything here is plain data; behaviour lives in `state` and `controller`.

use serde::{Deserialize, Serialize};

/// One normalized touch sample. `t` is a monotonic timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.t.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Start,
    Move,
    End,
    /// Platform cancelled the contact (touchcancel); never classified.
    Cancel,
}

/// Abstract input primitive produced by the normalizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub point: TouchPoint,
}

impl Primitive {
    pub fn start(x: f64, y: f64, t: f64) -> Self {
        Self { kind: PrimitiveKind::Start, point: TouchPoint::new(x, y, t) }
    }
    pub fn moved(x: f64, y: f64, t: f64) -> Self {
        Self { kind: PrimitiveKind::Move, point: TouchPoint::new(x, y, t) }
    }
    pub fn end(x: f64, y: f64, t: f64) -> Self {
        Self { kind: PrimitiveKind::End, point: TouchPoint::new(x, y, t) }
    }
    pub fn cancel(x: f64, y: f64, t: f64) -> Self {
        Self { kind: PrimitiveKind::Cancel, point: TouchPoint::new(x, y, t) }
    }
}

/// Horizontal region of the touch surface, used to pick the double-tap action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    Left,
    Center,
    Right,
}

impl Zone {
    /// `x` is relative to the overlay's left edge. A degenerate width maps to `Center`.
    pub fn from_x(x: f64, width: f64, left_fraction: f64, right_fraction: f64) -> Zone {
        if !(width.is_finite() && width > 0.0) || !x.is_finite() {
            return Zone::Center;
        }
        if x < width * left_fraction {
            Zone::Left
        } else if x > width * right_fraction {
            Zone::Right
        } else {
            Zone::Center
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlaybackCommand {
    TogglePlayPause,
    SeekBy(f64),
    SeekAbsolutePreview(f64),
    ToggleFullscreen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    Left,
    Right,
    Play,
    Pause,
    Maximize,
    Minimize,
}

impl FeedbackKind {
    pub fn glyph(self) -> &'static str {
        match self {
            FeedbackKind::Left => "⏪ 10s",
            FeedbackKind::Right => "10s ⏩",
            FeedbackKind::Play => "▶",
            FeedbackKind::Pause => "⏸",
            FeedbackKind::Maximize => "⛶",
            FeedbackKind::Minimize => "✕",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            FeedbackKind::Left => "left",
            FeedbackKind::Right => "right",
            FeedbackKind::Play => "play",
            FeedbackKind::Pause => "pause",
            FeedbackKind::Maximize => "maximize",
            FeedbackKind::Minimize => "minimize",
        }
    }
}

/// A flash marker. `id` is unique per presenter so concurrent flashes of one kind stay distinct.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub id: u64,
    pub kind: FeedbackKind,
    pub created_at: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeekDirection {
    Forward,
    Backward,
}

/// Content of the seek preview overlay while a drag is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeekPreview {
    pub target_seconds: f64,
    pub delta_seconds: f64,
    pub direction: SeekDirection,
    /// Target time as `mm:ss`.
    pub target_label: String,
    /// Signed, rounded magnitude such as `+20s`.
    pub magnitude_label: String,
}

/// Clamp `current + delta` into `[0, duration]`.
/// NaN or non-positive durations collapse the range to `[0, 0]`.
pub fn clamp_target(current: f64, delta: f64, duration: f64) -> f64 {
    let upper = sanitize_duration(duration);
    let current = if current.is_finite() { current } else { 0.0 };
    let delta = if delta.is_finite() { delta } else { 0.0 };
    (current + delta).clamp(0.0, upper)
}

pub fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_nan() || duration <= 0.0 { 0.0 } else { duration }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_thresholds_split_at_35_and_65_percent() {
        assert_eq!(Zone::from_x(10.0, 100.0, 0.35, 0.65), Zone::Left);
        assert_eq!(Zone::from_x(34.9, 100.0, 0.35, 0.65), Zone::Left);
        assert_eq!(Zone::from_x(35.0, 100.0, 0.35, 0.65), Zone::Center);
        assert_eq!(Zone::from_x(65.0, 100.0, 0.35, 0.65), Zone::Center);
        assert_eq!(Zone::from_x(65.1, 100.0, 0.35, 0.65), Zone::Right);
        assert_eq!(Zone::from_x(90.0, 100.0, 0.35, 0.65), Zone::Right);
    }

    #[test]
    fn zero_width_surface_is_center() {
        assert_eq!(Zone::from_x(5.0, 0.0, 0.35, 0.65), Zone::Center);
        assert_eq!(Zone::from_x(f64::NAN, 320.0, 0.35, 0.65), Zone::Center);
    }

    #[test]
    fn clamp_keeps_target_inside_media() {
        assert_eq!(clamp_target(100.0, -10.0, 600.0), 90.0);
        assert_eq!(clamp_target(590.0, 10.0, 600.0), 600.0);
        assert_eq!(clamp_target(5.0, -10.0, 600.0), 0.0);
    }

    #[test]
    fn degenerate_duration_clamps_to_zero() {
        assert_eq!(clamp_target(40.0, 10.0, f64::NAN), 0.0);
        assert_eq!(clamp_target(40.0, 10.0, 0.0), 0.0);
        assert_eq!(clamp_target(f64::NAN, 10.0, 600.0), 10.0);
    }
}
