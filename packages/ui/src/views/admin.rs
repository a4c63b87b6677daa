use api::{AdminData, AdminUser, AnalysisRecord};
use dioxus::prelude::*;

use crate::browser::confirm;
use crate::cancel::use_cancellation;
use crate::flows::admin::{
    self, filter_logs, filter_users, is_own_account, logs_for_user, EditForm, LogFilter,
    MutationState,
};
use crate::flows::{Destination, LoadError};
use crate::icons::{FaEye, FaMagnifyingGlass, FaPenToSquare, FaTrash};
use crate::navbar::Navbar;
use crate::session::{use_api, use_config, use_session};
use crate::timer::sleep;
use crate::views::verdict::percent;
use crate::views::{
    FallbackImage, ModalOverlay, RecordDetail, StatusKind, StatusMessage, VerdictBadge,
};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Users,
    Logs,
}

/// Admin console: stats, user management and the global analysis log.
#[component]
pub fn AdminView(on_navigate: EventHandler<Destination>) -> Element {
    let session = use_session();
    let api = use_api();
    let config = use_config();
    let token = use_cancellation();

    let mut data = use_signal(AdminData::default);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut tab = use_signal(|| Tab::Users);
    let mut search = use_signal(String::new);
    let mut log_filter = use_signal(LogFilter::default);
    let mut viewed_user = use_signal(|| Option::<AdminUser>::None);
    let mut viewed_log = use_signal(|| Option::<AnalysisRecord>::None);
    let mut editing = use_signal(|| Option::<EditForm>::None);
    let mut mutation = use_signal(MutationState::default);

    let reload = use_callback({
        let api = api.clone();
        let session = session.clone();
        let token = token.clone();
        move |_: ()| {
            let api = api.clone();
            let mut session = session.clone();
            let current = session.current();
            let token = token.clone();
            spawn(async move {
                let Some(loaded) = token.guard(admin::load_console(&api, current.as_ref())).await
                else {
                    return;
                };
                match loaded {
                    Ok(fresh) => {
                        data.set(fresh);
                        error.set(None);
                    }
                    Err(LoadError::Redirect(to)) => {
                        session.follow_redirect(to);
                        on_navigate.call(to);
                        return;
                    }
                    Err(LoadError::Message(message)) => error.set(Some(message)),
                }
                loading.set(false);
            });
        }
    });
    use_hook(move || reload.call(()));

    let close_delay = config.timing.success_close();
    // A successful mutation refreshes the data, then closes the modal after a beat.
    let mut finish = move |state: MutationState| {
        let succeeded = matches!(state, MutationState::Succeeded(_));
        mutation.set(state);
        if succeeded {
            reload.call(());
            spawn(async move {
                sleep(close_delay).await;
                editing.set(None);
                mutation.set(MutationState::Idle);
            });
        }
    };

    let save = {
        let api = api.clone();
        let session = session.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let (Some(current), Some(form)) = (session.current(), editing()) else {
                return;
            };
            let api = api.clone();
            mutation.set(MutationState::Submitting);
            spawn(async move {
                let state = admin::save_user(&api, &current, &form).await;
                finish(state);
            });
        }
    };

    let delete = {
        let api = api.clone();
        let session = session.clone();
        move |_: MouseEvent| {
            let Some(current) = session.current() else {
                return;
            };
            let Some(form) = editing() else {
                return;
            };
            let Some(target) = data.read().users.iter().find(|u| u.id == form.user_id).cloned()
            else {
                return;
            };
            let api = api.clone();
            spawn(async move {
                mutation.set(MutationState::Submitting);
                match admin::delete_user(&api, &current, &target, confirm).await {
                    Some(state) => finish(state),
                    None => mutation.set(MutationState::Idle),
                }
            });
        }
    };

    let image_url = move |record: &AnalysisRecord| config.static_image_url(&record.image_path);

    let snapshot = data();
    let users = filter_users(&snapshot.users, &search()).into_iter().cloned().collect::<Vec<_>>();
    let logs = filter_logs(&snapshot.logs, log_filter()).into_iter().cloned().collect::<Vec<_>>();
    let (total_users, total_logs) = (snapshot.users.len(), snapshot.logs.len());
    let (real_count, fake_count) = (snapshot.real_count(), snapshot.fake_count());
    let me = session.current();
    let tab_class = move |t: Tab| if tab() == t { "tab tab--active" } else { "tab" };
    let chip_class = move |f: LogFilter| if log_filter() == f { "chip chip--active" } else { "chip" };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        Navbar { current: Destination::Admin, on_navigate }
        main {
            class: "page page--wide",
            h1 { class: "page-title", "Admin Dashboard" }

            div {
                class: "stats",
                div { class: "stat", span { class: "stat-value", "{total_users}" } span { class: "stat-label", "Total Users" } }
                div { class: "stat", span { class: "stat-value", "{total_logs}" } span { class: "stat-label", "Total Analyses" } }
                div { class: "stat verdict-real", span { class: "stat-value", "{real_count}" } span { class: "stat-label", "Real Images" } }
                div { class: "stat verdict-fake", span { class: "stat-value", "{fake_count}" } span { class: "stat-label", "AI-Generated" } }
            }

            div {
                class: "tabs",
                button { class: tab_class(Tab::Users), onclick: move |_| tab.set(Tab::Users), "Users ({total_users})" }
                button { class: tab_class(Tab::Logs), onclick: move |_| tab.set(Tab::Logs), "Analysis Logs ({total_logs})" }
            }

            StatusMessage { kind: StatusKind::Error, message: error() }

            if loading() {
                div { class: "stage", span { class: "spinner" } span { "Loading data..." } }
            } else if tab() == Tab::Users {
                div {
                    class: "search",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    input {
                        r#type: "search",
                        placeholder: "Search by username or email",
                        value: search(),
                        oninput: move |evt: FormEvent| search.set(evt.value()),
                    }
                }
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Username" }
                            th { "Email" }
                            th { "Name" }
                            th { "Joined" }
                            th { "Real / Fake" }
                            th { "Total" }
                            th { "Role" }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        for user in users {
                            tr {
                                key: "{user.id}",
                                td { "{user.username}" }
                                td { "{user.email}" }
                                td { "{user.first_name}" }
                                td { class: "muted", "{user.date_joined}" }
                                td {
                                    span { class: "verdict-real", "{user.real_count}" }
                                    " / "
                                    span { class: "verdict-fake", "{user.fake_count}" }
                                }
                                td { "{user.total_analyses}" }
                                td {
                                    if user.is_superuser {
                                        span { class: "role role--admin", "Admin" }
                                    } else {
                                        span { class: "role", "User" }
                                    }
                                }
                                td {
                                    class: "actions",
                                    button {
                                        class: "icon-btn",
                                        title: "Edit",
                                        onclick: {
                                            let user = user.clone();
                                            move |_| {
                                                mutation.set(MutationState::Idle);
                                                editing.set(Some(EditForm::from(&user)));
                                            }
                                        },
                                        Icon { icon: FaPenToSquare, width: 14, height: 14 }
                                    }
                                    button {
                                        class: "icon-btn",
                                        title: "View",
                                        onclick: {
                                            let user = user.clone();
                                            move |_| viewed_user.set(Some(user.clone()))
                                        },
                                        Icon { icon: FaEye, width: 14, height: 14 }
                                    }
                                }
                            }
                        }
                    }
                }
            } else {
                div {
                    class: "filters",
                    for filter in LogFilter::ALL {
                        button {
                            key: "{filter.label()}",
                            class: chip_class(filter),
                            onclick: move |_| log_filter.set(filter),
                            "{filter.label()}"
                        }
                    }
                }
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Image" }
                            th { "User" }
                            th { "Result" }
                            th { "Confidence" }
                            th { "Time" }
                        }
                    }
                    tbody {
                        for (index, log) in logs.into_iter().enumerate() {
                            tr {
                                key: "{index}",
                                class: "clickable",
                                onclick: {
                                    let log = log.clone();
                                    move |_| viewed_log.set(Some(log.clone()))
                                },
                                td {
                                    FallbackImage {
                                        key: "{log.image_path}",
                                        class: "table-thumb",
                                        src: image_url(&log),
                                        alt: log.image_path.clone(),
                                    }
                                }
                                td { "{log.username.clone().unwrap_or_default()}" }
                                td { VerdictBadge { verdict: log.verdict(), short: true } }
                                td { "{percent(log.confidence)}" }
                                td { class: "muted", "{log.timestamp}" }
                            }
                        }
                    }
                }
            }
        }

        if let Some(user) = viewed_user() {
            ModalOverlay {
                title: "User: {user.username}",
                wide: true,
                on_close: move |_| viewed_user.set(None),
                div {
                    class: "user-detail",
                    p { "Email: {user.email}" }
                    p { "Name: {user.first_name}" }
                    p { "Joined: {user.date_joined}" }
                    p { "Analyses: {user.total_analyses} ({user.real_count} real, {user.fake_count} AI-generated)" }
                    if let Some(avg) = user.avg_confidence {
                        p { "Average confidence: {percent(avg)}" }
                    }
                    h3 { "Recent analyses" }
                    div {
                        class: "history-grid",
                        for (index, record) in logs_for_user(&snapshot.logs, &user).into_iter().cloned().enumerate() {
                            div {
                                key: "{index}",
                                class: "history-card",
                                onclick: {
                                    let record = record.clone();
                                    move |_| viewed_log.set(Some(record.clone()))
                                },
                                FallbackImage {
                                    key: "{record.image_path}",
                                    class: "history-thumb",
                                    src: image_url(&record),
                                    alt: record.image_path.clone(),
                                }
                                div {
                                    class: "history-meta",
                                    VerdictBadge { verdict: record.verdict(), short: true }
                                    span { class: "muted", "{record.timestamp}" }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(record) = viewed_log() {
            ModalOverlay {
                title: "Analysis Details",
                wide: true,
                on_close: move |_| viewed_log.set(None),
                RecordDetail { image_url: image_url(&record), record: record.clone() }
            }
        }

        if let Some(form) = editing() {
            ModalOverlay {
                title: "Edit User: {form.username}",
                on_close: move |_| {
                    if !mutation().is_submitting() {
                        editing.set(None);
                        mutation.set(MutationState::Idle);
                    }
                },
                form {
                    class: "settings-form",
                    onsubmit: save,
                    label { r#for: "edit-username", "Username" }
                    input {
                        id: "edit-username",
                        r#type: "text",
                        value: form.username.clone(),
                        oninput: move |evt: FormEvent| {
                            if let Some(f) = editing.write().as_mut() {
                                f.username = evt.value();
                            }
                        },
                    }
                    label { r#for: "edit-email", "Email" }
                    input {
                        id: "edit-email",
                        r#type: "email",
                        value: form.email.clone(),
                        oninput: move |evt: FormEvent| {
                            if let Some(f) = editing.write().as_mut() {
                                f.email = evt.value();
                            }
                        },
                    }
                    label { r#for: "edit-name", "Name" }
                    input {
                        id: "edit-name",
                        r#type: "text",
                        value: form.first_name.clone(),
                        oninput: move |evt: FormEvent| {
                            if let Some(f) = editing.write().as_mut() {
                                f.first_name = evt.value();
                            }
                        },
                    }
                    label { r#for: "edit-password", "New password (optional)" }
                    input {
                        id: "edit-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: form.password.clone(),
                        oninput: move |evt: FormEvent| {
                            if let Some(f) = editing.write().as_mut() {
                                f.password = evt.value();
                            }
                        },
                    }
                    label {
                        class: "checkbox",
                        input {
                            r#type: "checkbox",
                            checked: form.is_superuser,
                            disabled: me.as_ref().is_some_and(|s| is_own_account(s, form.user_id)),
                            onchange: move |evt: FormEvent| {
                                if let Some(f) = editing.write().as_mut() {
                                    f.is_superuser = evt.checked();
                                }
                            },
                        }
                        " Administrator"
                    }
                    if me.as_ref().is_some_and(|s| is_own_account(s, form.user_id)) {
                        small { class: "muted", "You cannot change your own admin status." }
                    }

                    match mutation() {
                        MutationState::Succeeded(message) => rsx! {
                            StatusMessage { kind: StatusKind::Success, message: Some(message) }
                        },
                        MutationState::Failed(message) => rsx! {
                            StatusMessage { kind: StatusKind::Error, message: Some(message) }
                        },
                        _ => rsx! {},
                    }

                    div {
                        class: "modal-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: mutation().is_submitting(),
                            if mutation().is_submitting() { "Saving..." } else { "Save Changes" }
                        }
                        if !me.as_ref().is_some_and(|s| is_own_account(s, form.user_id)) {
                            button {
                                class: "btn btn-danger",
                                r#type: "button",
                                disabled: mutation().is_submitting(),
                                onclick: delete,
                                Icon { icon: FaTrash, width: 14, height: 14 }
                                " Delete User"
                            }
                        }
                    }
                }
            }
        }
    }
}
