pub mod app;
pub mod control_bar;
pub mod feedback_flashes;
pub mod seek_feedback;
pub mod time_display;
pub mod video_player;

pub use app::App;
pub use video_player::VideoPlayer;
