use dioxus::prelude::*;
use ui::views::SettingsView;

use super::use_destination_navigator;

#[component]
pub fn Settings() -> Element {
    let navigate = use_destination_navigator();
    rsx! {
        SettingsView { on_navigate: navigate }
    }
}
