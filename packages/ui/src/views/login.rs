use std::collections::HashMap;

use api::AvailabilityField;
use dioxus::prelude::*;

use crate::debounce::DebouncedValidator;
use crate::flows::auth::{
    self, AvailabilityStatus, LoginForm, RegistrationForm, ResetForm,
};
use crate::flows::Destination;
use crate::session::{use_api, use_config, use_session};
use crate::views::{AvailabilityIndicator, StatusKind, StatusMessage};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
    Reset,
}

/// Sign-in page with registration and password reset forms.
///
/// Visitors who already hold a session are sent straight to their landing page.
#[component]
pub fn LoginView(on_navigate: EventHandler<Destination>) -> Element {
    let session = use_session();
    let api = use_api();
    let config = use_config();

    let mut mode = use_signal(|| Mode::Login);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let mut login = use_signal(LoginForm::default);
    let mut registration = use_signal(RegistrationForm::default);
    let mut reset = use_signal(ResetForm::default);
    let mut availability = use_signal(HashMap::<AvailabilityField, AvailabilityStatus>::new);
    let validator = use_hook(|| DebouncedValidator::new(config.timing.availability_debounce()));

    let existing = session.current();
    use_effect(move || {
        if let Some(existing) = existing.as_ref() {
            on_navigate.call(Destination::landing(existing));
        }
    });

    let mut switch_mode = move |next: Mode| {
        mode.set(next);
        error.set(None);
        availability.write().clear();
    };

    let check_field = use_callback({
        let api = api.clone();
        let validator = validator.clone();
        move |(field, value): (AvailabilityField, String)| {
            if value.trim().is_empty() {
                validator.cancel(field);
                availability.write().remove(&field);
                return;
            }
            availability
                .write()
                .insert(field, AvailabilityStatus::Checking);
            let api = api.clone();
            let validator = validator.clone();
            spawn(async move {
                if let Some(status) = auth::check_availability(&api, &validator, field, value).await {
                    availability.write().insert(field, status);
                }
            });
        }
    });

    let submit_login = {
        let api = api.clone();
        let session = session.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let api = api.clone();
            let mut session = session.clone();
            spawn(async move {
                busy.set(true);
                error.set(None);
                let form = login();
                match auth::sign_in(&api, &form).await {
                    Ok(signed_in) => {
                        busy.set(false);
                        let landing = Destination::landing(&signed_in);
                        session.sign_in(signed_in);
                        on_navigate.call(landing);
                    }
                    Err(message) => {
                        busy.set(false);
                        error.set(Some(message));
                    }
                }
            });
        }
    };

    let submit_register = {
        let api = api.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let api = api.clone();
            spawn(async move {
                busy.set(true);
                error.set(None);
                let form = registration();
                match auth::register(&api, &form).await {
                    Ok(message) => {
                        registration.set(RegistrationForm::default());
                        login.set(LoginForm {
                            username: form.username.trim().to_string(),
                            password: String::new(),
                        });
                        switch_mode(Mode::Login);
                        notice.set(Some(message));
                    }
                    Err(message) => error.set(Some(message)),
                }
                busy.set(false);
            });
        }
    };

    let submit_reset = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            busy.set(true);
            error.set(None);
            let form = reset();
            match auth::reset_password(&api, &form).await {
                Ok(message) => {
                    reset.set(ResetForm::default());
                    switch_mode(Mode::Login);
                    notice.set(Some(message));
                }
                Err(message) => error.set(Some(message)),
            }
            busy.set(false);
        });
    };

    let status_of = move |field: AvailabilityField| availability.read().get(&field).cloned();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "VeriAI" }
                p { class: "auth-subtitle", "Detect AI-generated images" }

                StatusMessage { kind: StatusKind::Success, message: notice() }
                StatusMessage { kind: StatusKind::Error, message: error() }

                {match mode() {
                    Mode::Login => rsx! {
                        form {
                            class: "auth-form",
                            onsubmit: submit_login,
                            label { r#for: "login-username", "Username" }
                            input {
                                id: "login-username",
                                r#type: "text",
                                autocomplete: "username",
                                value: login().username,
                                oninput: move |evt: FormEvent| login.write().username = evt.value(),
                            }
                            label { r#for: "login-password", "Password" }
                            input {
                                id: "login-password",
                                r#type: "password",
                                autocomplete: "current-password",
                                value: login().password,
                                oninput: move |evt: FormEvent| login.write().password = evt.value(),
                            }
                            button {
                                class: "btn btn-primary btn-block",
                                r#type: "submit",
                                disabled: busy(),
                                if busy() { "Signing in..." } else { "Sign In" }
                            }
                        }
                        div {
                            class: "auth-links",
                            button {
                                class: "link-btn",
                                onclick: move |_| { notice.set(None); switch_mode(Mode::Register) },
                                "Create an account"
                            }
                            button {
                                class: "link-btn",
                                onclick: move |_| { notice.set(None); switch_mode(Mode::Reset) },
                                "Forgot password?"
                            }
                        }
                    },
                    Mode::Register => rsx! {
                        form {
                            class: "auth-form",
                            onsubmit: submit_register,
                            label { r#for: "reg-name", "Full name" }
                            input {
                                id: "reg-name",
                                r#type: "text",
                                value: registration().name,
                                oninput: move |evt: FormEvent| registration.write().name = evt.value(),
                            }
                            label { r#for: "reg-username", "Username" }
                            input {
                                id: "reg-username",
                                r#type: "text",
                                value: registration().username,
                                oninput: move |evt: FormEvent| {
                                    registration.write().username = evt.value();
                                    check_field.call((AvailabilityField::Username, evt.value()));
                                },
                            }
                            AvailabilityIndicator { status: status_of(AvailabilityField::Username) }
                            label { r#for: "reg-email", "Email" }
                            input {
                                id: "reg-email",
                                r#type: "email",
                                value: registration().email,
                                oninput: move |evt: FormEvent| {
                                    registration.write().email = evt.value();
                                    check_field.call((AvailabilityField::Email, evt.value()));
                                },
                            }
                            AvailabilityIndicator { status: status_of(AvailabilityField::Email) }
                            label { r#for: "reg-mobile", "Mobile (optional)" }
                            input {
                                id: "reg-mobile",
                                r#type: "tel",
                                value: registration().mobile,
                                oninput: move |evt: FormEvent| {
                                    registration.write().mobile = evt.value();
                                    check_field.call((AvailabilityField::Mobile, evt.value()));
                                },
                            }
                            AvailabilityIndicator { status: status_of(AvailabilityField::Mobile) }
                            label { r#for: "reg-password", "Password" }
                            input {
                                id: "reg-password",
                                r#type: "password",
                                autocomplete: "new-password",
                                value: registration().password,
                                oninput: move |evt: FormEvent| registration.write().password = evt.value(),
                            }
                            label { r#for: "reg-confirm", "Confirm password" }
                            input {
                                id: "reg-confirm",
                                r#type: "password",
                                autocomplete: "new-password",
                                value: registration().confirm_password,
                                oninput: move |evt: FormEvent| registration.write().confirm_password = evt.value(),
                            }
                            button {
                                class: "btn btn-primary btn-block",
                                r#type: "submit",
                                disabled: busy(),
                                if busy() { "Creating account..." } else { "Register" }
                            }
                        }
                        div {
                            class: "auth-links",
                            button {
                                class: "link-btn",
                                onclick: move |_| switch_mode(Mode::Login),
                                "Already have an account? Sign in"
                            }
                        }
                    },
                    Mode::Reset => rsx! {
                        form {
                            class: "auth-form",
                            onsubmit: submit_reset,
                            label { r#for: "reset-email", "Email" }
                            input {
                                id: "reset-email",
                                r#type: "email",
                                value: reset().email,
                                oninput: move |evt: FormEvent| reset.write().email = evt.value(),
                            }
                            label { r#for: "reset-password", "New password" }
                            input {
                                id: "reset-password",
                                r#type: "password",
                                autocomplete: "new-password",
                                value: reset().password,
                                oninput: move |evt: FormEvent| reset.write().password = evt.value(),
                            }
                            label { r#for: "reset-confirm", "Confirm new password" }
                            input {
                                id: "reset-confirm",
                                r#type: "password",
                                autocomplete: "new-password",
                                value: reset().confirm_password,
                                oninput: move |evt: FormEvent| reset.write().confirm_password = evt.value(),
                            }
                            button {
                                class: "btn btn-primary btn-block",
                                r#type: "submit",
                                disabled: busy(),
                                if busy() { "Resetting..." } else { "Reset Password" }
                            }
                        }
                        div {
                            class: "auth-links",
                            button {
                                class: "link-btn",
                                onclick: move |_| switch_mode(Mode::Login),
                                "Back to sign in"
                            }
                        }
                    },
                }}
            }
        }
    }
}
