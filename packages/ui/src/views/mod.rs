//! Screens and the widgets they share.

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

pub mod verdict;
pub use verdict::{ProbabilityBreakdown, VerdictBadge};

mod fallback_image;
pub use fallback_image::{FallbackImage, PLACEHOLDER_IMAGE};

mod status_message;
pub use status_message::{StatusKind, StatusMessage};

mod availability_indicator;
pub use availability_indicator::AvailabilityIndicator;

mod camera_capture;
pub use camera_capture::CameraCapture;

mod record_detail;
pub use record_detail::RecordDetail;

mod login;
pub use login::LoginView;

mod dashboard;
pub use dashboard::DashboardView;

mod history;
pub use history::HistoryView;

mod settings;
pub use settings::SettingsView;

mod admin;
pub use admin::AdminView;
