use api::AnalysisRecord;
use dioxus::prelude::*;

use crate::cancel::use_cancellation;
use crate::flows::history::load_history;
use crate::flows::{Destination, LoadError};
use crate::navbar::Navbar;
use crate::session::{use_api, use_config, use_session};
use crate::views::{
    FallbackImage, ModalOverlay, RecordDetail, StatusKind, StatusMessage, VerdictBadge,
};
use crate::views::verdict::percent;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Grid of the signed-in user's past analyses.
#[component]
pub fn HistoryView(on_navigate: EventHandler<Destination>) -> Element {
    let mut session = use_session();
    let api = use_api();
    let config = use_config();
    let token = use_cancellation();

    let mut records = use_signal(Vec::<AnalysisRecord>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut selected = use_signal(|| Option::<AnalysisRecord>::None);

    use_hook(move || {
        spawn(async move {
            let current = session.current();
            let Some(loaded) = token.guard(load_history(&api, current.as_ref())).await else {
                return;
            };
            match loaded {
                Ok(list) => records.set(list),
                Err(LoadError::Redirect(to)) => {
                    session.follow_redirect(to);
                    on_navigate.call(to);
                    return;
                }
                Err(LoadError::Message(message)) => error.set(Some(message)),
            }
            loading.set(false);
        });
    });

    let image_url = {
        let config = config.clone();
        move |record: &AnalysisRecord| config.static_image_url(&record.image_path)
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        Navbar { current: Destination::History, on_navigate }
        main {
            class: "page",
            h1 { class: "page-title", "Analysis History" }

            StatusMessage { kind: StatusKind::Error, message: error() }

            if loading() {
                div { class: "stage", span { class: "spinner" } span { "Loading history..." } }
            } else if records.read().is_empty() && error().is_none() {
                div {
                    class: "empty-state",
                    p { "You haven't analyzed any images yet." }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_navigate.call(Destination::Dashboard),
                        "Analyze an image"
                    }
                }
            } else {
                div {
                    class: "history-grid",
                    for (index, record) in records().into_iter().enumerate() {
                        div {
                            key: "{record.id.unwrap_or(index as i64)}-{index}",
                            class: "history-card",
                            onclick: {
                                let record = record.clone();
                                move |_| selected.set(Some(record.clone()))
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
                                span { class: "confidence", "{percent(record.confidence)}" }
                                span { class: "muted", "{record.timestamp}" }
                            }
                        }
                    }
                }
            }
        }

        if let Some(record) = selected() {
            ModalOverlay {
                title: "Analysis Details",
                wide: true,
                on_close: move |_| selected.set(None),
                RecordDetail { image_url: image_url(&record), record: record.clone() }
            }
        }
    }
}
