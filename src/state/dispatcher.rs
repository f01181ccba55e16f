// Resolved gesture -> PlaybackCommand -> one Player mutation
use crate::model::{clamp_target, sanitize_duration, FeedbackKind, PlaybackCommand, Zone};
use crate::player::Player;
use crate::state::classifier::Resolution;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dispatched {
    pub command: PlaybackCommand,
    /// Flash to show, if the command changed something worth flashing.
    pub feedback: Option<FeedbackKind>,
}

#[derive(Clone, Copy, Debug)]
pub struct ActionDispatcher {
    seek_step_seconds: f64,
}

impl ActionDispatcher {
    pub fn new(seek_step_seconds: f64) -> Self {
        Self { seek_step_seconds }
    }

    pub fn command_for(&self, resolution: Resolution) -> PlaybackCommand {
        match resolution {
            Resolution::SingleTap => PlaybackCommand::TogglePlayPause,
            Resolution::DoubleTap(Zone::Left) => PlaybackCommand::SeekBy(-self.seek_step_seconds),
            Resolution::DoubleTap(Zone::Right) => PlaybackCommand::SeekBy(self.seek_step_seconds),
            Resolution::DoubleTap(Zone::Center) => PlaybackCommand::ToggleFullscreen,
            Resolution::Drag { delta_seconds } => PlaybackCommand::SeekBy(delta_seconds),
        }
    }

    pub fn dispatch(&self, resolution: Resolution, player: &dyn Player) -> Dispatched {
        let command = self.command_for(resolution);
        let applied = self.apply(command, player);
        // drag commits already had the live preview overlay as feedback
        let feedback = match resolution {
            Resolution::Drag { .. } => None,
            _ => applied,
        };
        Dispatched { command, feedback }
    }

    /// Applies `command` to the player. Returns the matching flash kind when the
    /// player was actually mutated.
    pub fn apply(&self, command: PlaybackCommand, player: &dyn Player) -> Option<FeedbackKind> {
        match command {
            PlaybackCommand::TogglePlayPause => {
                if player.paused() {
                    player.play();
                    Some(FeedbackKind::Play)
                } else {
                    player.pause();
                    Some(FeedbackKind::Pause)
                }
            }
            PlaybackCommand::SeekBy(delta) => {
                let duration = sanitize_duration(player.duration());
                if duration == 0.0 || !delta.is_finite() {
                    log::debug!("seek ignored: no usable duration");
                    return None;
                }
                let target = clamp_target(player.current_time(), delta, duration);
                player.set_current_time(target);
                Some(if delta < 0.0 { FeedbackKind::Left } else { FeedbackKind::Right })
            }
            // preview only; the seek overlay renders it, the player is untouched
            PlaybackCommand::SeekAbsolutePreview(_) => None,
            PlaybackCommand::ToggleFullscreen => {
                if player.is_fullscreen() {
                    player.exit_fullscreen();
                    Some(FeedbackKind::Minimize)
                } else {
                    player.request_fullscreen();
                    Some(FeedbackKind::Maximize)
                }
            }
        }
    }
}
