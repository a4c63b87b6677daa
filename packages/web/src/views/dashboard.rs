use dioxus::prelude::*;
use ui::views::DashboardView;

use super::use_destination_navigator;

#[component]
pub fn Dashboard() -> Element {
    let navigate = use_destination_navigator();
    rsx! {
        DashboardView { on_navigate: navigate }
    }
}
