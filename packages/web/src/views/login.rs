use dioxus::prelude::*;
use ui::views::LoginView;

use super::use_destination_navigator;

#[component]
pub fn Login() -> Element {
    let navigate = use_destination_navigator();
    rsx! {
        LoginView { on_navigate: navigate }
    }
}
