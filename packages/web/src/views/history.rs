use dioxus::prelude::*;
use ui::views::HistoryView;

use super::use_destination_navigator;

#[component]
pub fn History() -> Element {
    let navigate = use_destination_navigator();
    rsx! {
        HistoryView { on_navigate: navigate }
    }
}
