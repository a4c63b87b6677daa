use dioxus::prelude::*;
use ui::Destination;

use crate::Route;

mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod history;
pub use history::History;

mod settings;
pub use settings::Settings;

mod admin;
pub use admin::Admin;

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Login => Route::Login {},
            Destination::Dashboard => Route::Dashboard {},
            Destination::History => Route::History {},
            Destination::Settings => Route::Settings {},
            Destination::Admin => Route::Admin {},
        }
    }
}

/// Router-backed navigation handed to the shared views.
pub(crate) fn use_destination_navigator() -> impl FnMut(Destination) + Clone + 'static {
    let nav = use_navigator();
    move |destination: Destination| {
        nav.push(Route::from(destination));
    }
}
