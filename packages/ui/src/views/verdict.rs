//! Verdict badge and probability bars shared by the dashboard, history and admin views.

use api::Verdict;
use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaRobot};
use crate::Icon;

#[component]
pub fn VerdictBadge(verdict: Verdict, #[props(default)] short: bool) -> Element {
    let label = if short { verdict.short_label() } else { verdict.label() };
    let class = verdict.css_class();

    rsx! {
        span {
            class: "verdict-badge {class}",
            {match verdict {
                Verdict::Real => rsx! { Icon { icon: FaCircleCheck, width: 12, height: 12 } },
                Verdict::Fake => rsx! { Icon { icon: FaRobot, width: 12, height: 12 } },
            }}
            " {label}"
        }
    }
}

/// Format a percentage with one decimal.
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Confidence plus real/fake bars. Missing probabilities are derived from the
/// confidence and verdict.
#[component]
pub fn ProbabilityBreakdown(
    verdict: Verdict,
    confidence: f64,
    real_prob: Option<f64>,
    fake_prob: Option<f64>,
) -> Element {
    let (real, fake) = match (real_prob, fake_prob) {
        (Some(r), Some(f)) => (r, f),
        _ if verdict == Verdict::Real => (confidence, 100.0 - confidence),
        _ => (100.0 - confidence, confidence),
    };
    let confidence_text = percent(confidence);
    let (real_text, fake_text) = (percent(real), percent(fake));
    let (real_width, fake_width) = (real.clamp(0.0, 100.0), fake.clamp(0.0, 100.0));

    rsx! {
        div {
            class: "probabilities",
            p { class: "confidence", "Confidence: " strong { "{confidence_text}" } }
            div {
                class: "prob-row",
                span { class: "prob-label", "Real" }
                div { class: "prob-track",
                    div { class: "prob-fill verdict-real", style: "width: {real_width}%" }
                }
                span { class: "prob-value", "{real_text}" }
            }
            div {
                class: "prob-row",
                span { class: "prob-label", "AI-Generated" }
                div { class: "prob-track",
                    div { class: "prob-fill verdict-fake", style: "width: {fake_width}%" }
                }
                span { class: "prob-value", "{fake_text}" }
            }
        }
    }
}
