pub mod classifier;
pub mod dispatcher;
pub mod feedback;
pub mod normalizer;
pub mod seek_preview;
pub mod session;

pub use classifier::{GestureClassifier, Resolution, Step};
pub use dispatcher::{ActionDispatcher, Dispatched};
pub use feedback::FeedbackPresenter;
pub use normalizer::{contacts_from_event, RawPhase, RawTouch, TouchNormalizer};
pub use seek_preview::{build_preview, SeekPreviewRenderer};
pub use session::GestureSession;
