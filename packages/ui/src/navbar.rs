use dioxus::prelude::*;

use crate::flows::{auth, Destination};
use crate::icons::{FaClockRotateLeft, FaGear, FaRightFromBracket, FaShieldHalved};
use crate::session::{use_api, use_session};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar: brand, History, Settings, Admin (admins only), and Logout or Sign In.
#[component]
pub fn Navbar(current: Destination, on_navigate: EventHandler<Destination>) -> Element {
    let session = use_session();
    let api = use_api();
    let username = session.current().map(|s| s.username);
    let is_admin = session.is_admin();

    let link_class = move |target: Destination| {
        if target == current {
            "nav-link nav-link--active"
        } else {
            "nav-link"
        }
    };

    let logout = move |_| {
        let mut session = session.clone();
        let api = api.clone();
        spawn(async move {
            auth::sign_out(&api, session.current().as_ref()).await;
            session.sign_out();
            on_navigate.call(Destination::Login);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            button {
                class: "navbar-brand",
                onclick: move |_| on_navigate.call(Destination::Dashboard),
                "VeriAI"
            }
            div {
                class: "navbar-links",
                button {
                    class: link_class(Destination::History),
                    onclick: move |_| on_navigate.call(Destination::History),
                    Icon { icon: FaClockRotateLeft, width: 14, height: 14 }
                    " History"
                }
                button {
                    class: link_class(Destination::Settings),
                    onclick: move |_| on_navigate.call(Destination::Settings),
                    Icon { icon: FaGear, width: 14, height: 14 }
                    " Settings"
                }
                if is_admin {
                    button {
                        class: link_class(Destination::Admin),
                        onclick: move |_| on_navigate.call(Destination::Admin),
                        Icon { icon: FaShieldHalved, width: 14, height: 14 }
                        " Admin"
                    }
                }
                if let Some(name) = username {
                    span { class: "navbar-user", "{name}" }
                    button {
                        class: "nav-link nav-link--logout",
                        onclick: logout,
                        Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                        " Logout"
                    }
                } else {
                    button {
                        class: "nav-link",
                        onclick: move |_| on_navigate.call(Destination::Login),
                        "Sign In"
                    }
                }
            }
        }
    }
}
