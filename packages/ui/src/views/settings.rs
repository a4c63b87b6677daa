use dioxus::prelude::*;

use crate::browser::confirm;
use crate::cancel::use_cancellation;
use crate::flows::settings::{
    self, ClearOutcome, ProfileForm, PROFILE_SAVED,
};
use crate::flows::{Destination, LoadError};
use crate::icons::FaTrash;
use crate::navbar::Navbar;
use crate::session::{use_api, use_session};
use crate::views::{StatusKind, StatusMessage};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Profile editor and history purge.
#[component]
pub fn SettingsView(on_navigate: EventHandler<Destination>) -> Element {
    let session = use_session();
    let api = use_api();
    let token = use_cancellation();

    let mut form = use_signal(ProfileForm::default);
    let mut loading = use_signal(|| true);
    let mut saving = use_signal(|| false);
    let mut profile_error = use_signal(|| Option::<String>::None);
    let mut profile_notice = use_signal(|| Option::<String>::None);
    let mut history_count = use_signal(|| 0usize);
    let mut clearing = use_signal(|| false);
    let mut history_error = use_signal(|| Option::<String>::None);
    let mut history_notice = use_signal(|| Option::<String>::None);

    use_hook({
        let api = api.clone();
        let mut session = session.clone();
        let token = token.clone();
        move || {
            spawn(async move {
                let current = session.current();
                let Some(loaded) = token.guard(settings::load_profile(&api, current.as_ref())).await
                else {
                    return;
                };
                match loaded {
                    Ok(profile) => form.set(profile),
                    Err(LoadError::Redirect(to)) => {
                        session.follow_redirect(to);
                        on_navigate.call(to);
                        return;
                    }
                    Err(LoadError::Message(message)) => profile_error.set(Some(message)),
                }
                loading.set(false);

                if let Some(current) = current {
                    if let Some(count) = token.guard(settings::history_count(&api, &current)).await {
                        history_count.set(count);
                    }
                }
            })
        }
    });

    let save = {
        let api = api.clone();
        let session = session.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let Some(current) = session.current() else {
                on_navigate.call(Destination::Login);
                return;
            };
            let api = api.clone();
            let mut session = session.clone();
            spawn(async move {
                saving.set(true);
                profile_error.set(None);
                profile_notice.set(None);
                let submitted = form();
                match settings::save_profile(&api, &current, &submitted).await {
                    Ok(profile) => {
                        if profile.username != current.username {
                            session.rename(&profile.username);
                        }
                        form.set(ProfileForm::from(profile));
                        profile_notice.set(Some(PROFILE_SAVED.to_string()));
                    }
                    Err(message) => profile_error.set(Some(message)),
                }
                saving.set(false);
            });
        }
    };

    let clear = move |_: MouseEvent| {
        let Some(current) = session.current() else {
            on_navigate.call(Destination::Login);
            return;
        };
        let api = api.clone();
        spawn(async move {
            clearing.set(true);
            history_error.set(None);
            history_notice.set(None);
            let count = history_count();
            match settings::clear_history(&api, &current, count, confirm).await {
                Ok(ClearOutcome::Cleared(message)) => {
                    history_count.set(0);
                    history_notice.set(Some(message));
                }
                Ok(ClearOutcome::Cancelled) => {}
                Err(message) => history_error.set(Some(message)),
            }
            clearing.set(false);
        });
    };

    let count = history_count();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        Navbar { current: Destination::Settings, on_navigate }
        main {
            class: "page page--narrow",
            h1 { class: "page-title", "Settings" }

            section {
                class: "card",
                h2 { "Profile" }
                StatusMessage { kind: StatusKind::Success, message: profile_notice() }
                StatusMessage { kind: StatusKind::Error, message: profile_error() }
                if loading() {
                    div { class: "stage", span { class: "spinner" } span { "Loading profile..." } }
                } else {
                    form {
                        class: "settings-form",
                        onsubmit: save,
                        label { r#for: "settings-username", "Username" }
                        input {
                            id: "settings-username",
                            r#type: "text",
                            value: form().username,
                            oninput: move |evt: FormEvent| form.write().username = evt.value(),
                        }
                        label { r#for: "settings-email", "Email" }
                        input {
                            id: "settings-email",
                            r#type: "email",
                            value: form().email,
                            oninput: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                        label { r#for: "settings-name", "Full name" }
                        input {
                            id: "settings-name",
                            r#type: "text",
                            value: form().first_name,
                            oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                        label { r#for: "settings-mobile", "Mobile" }
                        input {
                            id: "settings-mobile",
                            r#type: "tel",
                            value: form().mobile,
                            oninput: move |evt: FormEvent| form.write().mobile = evt.value(),
                        }
                        label { r#for: "settings-password", "New password (leave blank to keep current)" }
                        input {
                            id: "settings-password",
                            r#type: "password",
                            autocomplete: "new-password",
                            value: form().new_password,
                            oninput: move |evt: FormEvent| form.write().new_password = evt.value(),
                        }
                        label { r#for: "settings-confirm", "Confirm new password" }
                        input {
                            id: "settings-confirm",
                            r#type: "password",
                            autocomplete: "new-password",
                            value: form().confirm_password,
                            oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: saving(),
                            if saving() { "Saving..." } else { "Save Changes" }
                        }
                    }
                }
            }

            section {
                class: "card card--danger",
                h2 { "Analysis History" }
                p { class: "muted", "You have {count} saved analyses." }
                StatusMessage { kind: StatusKind::Success, message: history_notice() }
                StatusMessage { kind: StatusKind::Error, message: history_error() }
                button {
                    class: "btn btn-danger",
                    disabled: clearing() || count == 0,
                    onclick: clear,
                    Icon { icon: FaTrash, width: 14, height: 14 }
                    if clearing() { " Clearing..." } else { " Clear all history" }
                }
            }
        }
    }
}
