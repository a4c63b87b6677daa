use dioxus::prelude::*;
use ui::views::AdminView;

use super::use_destination_navigator;

#[component]
pub fn Admin() -> Element {
    let navigate = use_destination_navigator();
    rsx! {
        AdminView { on_navigate: navigate }
    }
}
