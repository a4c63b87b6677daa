use api::{PredictPhase, Prediction, Upload};
use dioxus::html::HasFileData;
use dioxus::prelude::*;

use crate::analysis::{drive_stages, StageTracker};
use crate::browser::use_escape_key;
use crate::cancel::use_cancellation;
use crate::debounce::DebouncedValidator;
use crate::flows::dashboard::{self, AnalysisOutcome};
use crate::flows::Destination;
use crate::icons::{FaCamera, FaCloudArrowUp, FaRotateLeft};
use crate::navbar::Navbar;
use crate::session::{use_api, use_config, use_session};
use crate::timer::now_ms;
use crate::views::{
    CameraCapture, ProbabilityBreakdown, StatusKind, StatusMessage, VerdictBadge,
};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Upload, camera capture and the analysis result.
#[component]
pub fn DashboardView(on_navigate: EventHandler<Destination>) -> Element {
    let session = use_session();
    let api = use_api();
    let config = use_config();
    let token = use_cancellation();

    let runs = use_hook(|| DebouncedValidator::<()>::new(config.timing.analysis_autostart()));
    let stage_floor = config.timing.stage_floor();

    let mut preview = use_signal(|| Option::<String>::None);
    let mut file_name = use_signal(String::new);
    let mut result = use_signal(|| Option::<Prediction>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut tracker = use_signal(|| StageTracker::new(stage_floor));
    let mut dragging = use_signal(|| false);
    let mut camera_open = use_signal(|| false);
    // Bumped on every selection and reset; stale runs compare against it.
    let mut run_id = use_signal(|| 0u64);

    let reset = use_callback({
        let runs = runs.clone();
        move |_: ()| {
            runs.cancel(());
            *run_id.write() += 1;
            preview.set(None);
            file_name.set(String::new());
            result.set(None);
            error.set(None);
            tracker.write().reset();
        }
    });
    use_escape_key(move || reset.call(()));

    let select = use_callback(move |upload: Upload| {
        reset.call(());
        let this_run = run_id();
        preview.set(Some(dashboard::preview_url(&upload)));
        file_name.set(upload.file_name.clone());

        let api = api.clone();
        let runs = runs.clone();
        let token = token.clone();
        let identity = session.current();
        spawn(async move {
            let observe = move |phase: PredictPhase| {
                if run_id() != this_run {
                    return;
                }
                tracker.write().observe(phase, now_ms());
                if phase == PredictPhase::Sent {
                    spawn(drive_stages(
                        move |now| tracker.write().tick(now),
                        stage_floor / 4,
                    ));
                }
            };
            let outcome = token
                .guard(dashboard::analyze(&api, &runs, identity.as_ref(), &upload, observe))
                .await;
            if run_id() != this_run {
                return;
            }
            match outcome {
                Some(AnalysisOutcome::Finished(prediction)) => result.set(Some(prediction)),
                Some(AnalysisOutcome::Failed(message)) => {
                    tracker.write().fail();
                    error.set(Some(message));
                }
                Some(AnalysisOutcome::Superseded) | None => {}
            }
        });
    });

    let take_first_file = move |files: Option<std::sync::Arc<dyn dioxus::html::FileEngine>>| async move {
        let Some(engine) = files else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        match engine.read_file(&name).await {
            Some(bytes) => match dashboard::accept_file(&name, bytes) {
                Ok(upload) => select.call(upload),
                Err(message) => error.set(Some(message)),
            },
            None => error.set(Some(format!("Could not read {name}"))),
        }
    };

    let busy = tracker.read().is_busy();
    let stage_label = tracker.read().shown().label();
    let show_result = tracker.read().is_complete();
    let drop_class = if dragging() { "dropzone dropzone--active" } else { "dropzone" };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        Navbar { current: Destination::Dashboard, on_navigate }
        main {
            class: "page",
            h1 { class: "page-title", "AI Image Detection" }
            p { class: "page-subtitle", "Upload an image or take a photo to check whether it was generated by AI." }

            StatusMessage { kind: StatusKind::Error, message: error() }

            if camera_open() {
                CameraCapture {
                    on_capture: move |upload: Upload| {
                        camera_open.set(false);
                        select.call(upload);
                    },
                    on_close: move |_| camera_open.set(false),
                }
            } else if let Some(src) = preview() {
                div {
                    class: "analysis",
                    div {
                        class: "analysis-preview",
                        img { src: "{src}", alt: "{file_name}" }
                        p { class: "muted", "{file_name}" }
                    }
                    div {
                        class: "analysis-panel",
                        if busy {
                            div {
                                class: "stage",
                                span { class: "spinner" }
                                span { "{stage_label}" }
                            }
                        }
                        if show_result {
                            if let Some(prediction) = result() {
                                div {
                                    class: "result",
                                    VerdictBadge { verdict: prediction.verdict() }
                                    ProbabilityBreakdown {
                                        verdict: prediction.verdict(),
                                        confidence: prediction.confidence,
                                        real_prob: prediction.real_prob,
                                        fake_prob: prediction.fake_prob,
                                    }
                                    if let Some(url) = prediction.explanation_url() {
                                        div {
                                            class: "explanation",
                                            h3 { "Explanation" }
                                            img { class: "explanation-image", src: "{url}", alt: "Explanation heatmap" }
                                        }
                                    }
                                    if let Some(text) = prediction.explanation_text() {
                                        p { class: "explanation-text", "{text}" }
                                    }
                                }
                            }
                        }
                        button {
                            class: "btn btn-outline",
                            onclick: move |_| reset.call(()),
                            Icon { icon: FaRotateLeft, width: 14, height: 14 }
                            " Analyze another image"
                        }
                    }
                }
            } else {
                div {
                    class: "{drop_class}",
                    ondragover: move |evt: DragEvent| {
                        evt.prevent_default();
                        dragging.set(true);
                    },
                    ondragleave: move |evt: DragEvent| {
                        evt.prevent_default();
                        dragging.set(false);
                    },
                    ondrop: move |evt: DragEvent| {
                        evt.prevent_default();
                        dragging.set(false);
                        take_first_file(evt.files())
                    },
                    Icon { icon: FaCloudArrowUp, width: 40, height: 40 }
                    p {
                        "Drop image here or "
                        label { class: "link-btn", r#for: "image-input", "browse" }
                    }
                    input {
                        id: "image-input",
                        class: "visually-hidden",
                        r#type: "file",
                        accept: "image/*",
                        onchange: move |evt: FormEvent| take_first_file(evt.files()),
                    }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| camera_open.set(true),
                        Icon { icon: FaCamera, width: 14, height: 14 }
                        " Use camera"
                    }
                }
            }
        }
    }
}
