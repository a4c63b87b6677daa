//! Image selection and analysis.

use api::{ApiClient, PredictPhase, Prediction, Transport, Upload};
use base64::Engine;
use store::Session;

use crate::debounce::DebouncedValidator;

pub const ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";
pub const NOT_AN_IMAGE: &str = "Please select an image file";

/// Turn a picked or dropped file into an upload, rejecting non-images.
pub fn accept_file(file_name: &str, bytes: Vec<u8>) -> Result<Upload, String> {
    match Upload::image(file_name, bytes) {
        Some(upload) if !upload.is_empty() => Ok(upload),
        Some(_) => Err("The selected file is empty".to_string()),
        None => Err(NOT_AN_IMAGE.to_string()),
    }
}

/// Inline preview of a selected image.
pub fn preview_url(upload: &Upload) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(&upload.bytes);
    format!("data:{};base64,{payload}", upload.mime)
}

/// Outcome of one selected image.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Finished(Prediction),
    Failed(String),
    /// Another image was selected (or the view reset) before this one finished.
    Superseded,
}

/// Wait out the auto-start delay, then post `upload` once.
///
/// `runs` is the dashboard's single-key debouncer: a newer selection, or a
/// reset through [`DebouncedValidator::cancel`], supersedes this run before
/// or while it is in flight.
pub async fn analyze<T: Transport>(
    client: &ApiClient<T>,
    runs: &DebouncedValidator<()>,
    session: Option<&Session>,
    upload: &Upload,
    observe: impl FnMut(PredictPhase),
) -> AnalysisOutcome {
    let result = runs
        .submit((), || client.predict(session, upload, observe))
        .await;
    match result {
        None => AnalysisOutcome::Superseded,
        Some(Ok(prediction)) => {
            tracing::info!(
                "{} classified as {} ({:.1}%)",
                upload.file_name,
                prediction.verdict().label(),
                prediction.confidence
            );
            AnalysisOutcome::Finished(prediction)
        }
        Some(Err(e)) => {
            tracing::error!("Analysis of {} failed: {}", upload.file_name, e);
            AnalysisOutcome::Failed(ANALYSIS_FAILED.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Stage, StageTracker};
    use crate::timer::{now_ms, sleep};
    use api::{Method, RecordingTransport};
    use serde_json::json;
    use std::time::Duration;

    const AUTOSTART: Duration = Duration::from_millis(300);

    fn client() -> ApiClient<RecordingTransport> {
        let client = ApiClient::new(RecordingTransport::new());
        client.transport().respond(
            Method::Post,
            "/predict",
            200,
            json!({"success": true, "isReal": false, "confidence": 97.0, "real_prob": 3.0, "fake_prob": 97.0}),
        );
        client
    }

    fn upload(name: &str) -> Upload {
        accept_file(name, vec![0xff, 0xd8, 0xff]).unwrap()
    }

    #[test]
    fn only_images_are_accepted() {
        assert_eq!(accept_file("notes.txt", vec![1]), Err(NOT_AN_IMAGE.to_string()));
        assert!(accept_file("empty.png", Vec::new()).is_err());
        assert_eq!(upload("shot.webp").mime, "image/webp");
    }

    #[test]
    fn preview_is_a_data_url_with_the_upload_mime() {
        let upload = accept_file("dot.png", vec![1, 2, 3]).unwrap();
        assert_eq!(preview_url(&upload), "data:image/png;base64,AQID");
    }

    #[tokio::test(start_paused = true)]
    async fn one_selection_posts_once() {
        let client = client();
        let runs = DebouncedValidator::new(AUTOSTART);
        let mut tracker = StageTracker::new(Duration::from_millis(600));

        let outcome = analyze(&client, &runs, None, &upload("cat.jpg"), |phase| {
            tracker.observe(phase, now_ms())
        })
        .await;

        let AnalysisOutcome::Finished(prediction) = outcome else {
            panic!("expected a prediction");
        };
        assert!(!prediction.is_real);
        assert_eq!(client.transport().calls_to("/predict"), 1);
        assert_eq!(tracker.reached(), Stage::Complete);
        assert!(!tracker.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn reselecting_during_autostart_posts_only_the_latest() {
        let client = client();
        let runs = DebouncedValidator::new(AUTOSTART);
        let (older, newer) = (upload("first.png"), upload("second.png"));

        let (first, second) = tokio::join!(
            analyze(&client, &runs, None, &older, |_| {}),
            async {
                sleep(Duration::from_millis(100)).await;
                analyze(&client, &runs, None, &newer, |_| {}).await
            },
        );

        assert_eq!(first, AnalysisOutcome::Superseded);
        assert!(matches!(second, AnalysisOutcome::Finished(_)));
        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        match &calls[0].body {
            api::RequestBody::Multipart { file_name, .. } => assert_eq!(file_name, "second.png"),
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reset_before_autostart_sends_nothing() {
        let client = client();
        let runs = DebouncedValidator::new(AUTOSTART);
        let selected = upload("cat.png");

        let (outcome, _) = tokio::join!(
            analyze(&client, &runs, None, &selected, |_| {}),
            async {
                sleep(Duration::from_millis(50)).await;
                runs.cancel(());
            },
        );

        assert_eq!(outcome, AnalysisOutcome::Superseded);
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_has_a_fixed_message() {
        let client = ApiClient::new(RecordingTransport::new());
        client.transport().unreachable(Method::Post, "/predict");
        let runs = DebouncedValidator::new(AUTOSTART);
        let session = Session::new(5, "erin", false);

        let outcome = analyze(&client, &runs, Some(&session), &upload("cat.png"), |_| {}).await;
        assert_eq!(outcome, AnalysisOutcome::Failed(ANALYSIS_FAILED.to_string()));
        assert_eq!(client.transport().calls()[0].identity.as_deref(), Some("5"));
    }
}
