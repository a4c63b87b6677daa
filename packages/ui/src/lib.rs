//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod analysis;
pub mod browser;
pub mod camera;
pub mod cancel;
pub mod debounce;
pub mod flows;
pub mod timer;
pub mod views;

mod session;
pub use session::{use_api, use_config, use_session, SessionContext, SessionProvider};

mod navbar;
pub use navbar::Navbar;

pub use flows::Destination;
