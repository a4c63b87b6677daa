use api::AnalysisRecord;
use dioxus::prelude::*;

use crate::views::{FallbackImage, ProbabilityBreakdown, VerdictBadge};

/// Full view of one stored analysis, used by the history and admin log modals.
#[component]
pub fn RecordDetail(record: AnalysisRecord, image_url: String) -> Element {
    let verdict = record.verdict();
    let explanation_url = record.explanation_url();
    let owner = record.username.clone();

    rsx! {
        div {
            class: "record-detail",
            FallbackImage {
                key: "{image_url}",
                class: "record-detail-image",
                src: image_url.clone(),
                alt: record.image_path.clone(),
            }
            div {
                class: "record-detail-body",
                VerdictBadge { verdict }
                ProbabilityBreakdown {
                    verdict,
                    confidence: record.confidence,
                    real_prob: record.real_prob,
                    fake_prob: record.fake_prob,
                }
                if let Some(name) = owner {
                    p { class: "muted", "User: {name}" }
                }
                p { class: "muted", "Analyzed: {record.timestamp}" }
                if let Some(url) = explanation_url {
                    div {
                        class: "explanation",
                        h3 { "Explanation" }
                        img { class: "explanation-image", src: "{url}", alt: "Explanation heatmap" }
                    }
                }
                if let Some(text) = record.explanation_text.clone() {
                    p { class: "explanation-text", "{text}" }
                }
            }
        }
    }
}
