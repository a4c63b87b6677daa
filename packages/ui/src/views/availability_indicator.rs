use dioxus::prelude::*;

use crate::flows::auth::AvailabilityStatus;

/// Small hint under a registration field. Advisory only.
#[component]
pub fn AvailabilityIndicator(status: Option<AvailabilityStatus>) -> Element {
    match status {
        Some(AvailabilityStatus::Checking) => rsx! {
            small { class: "availability availability--checking", "Checking..." }
        },
        Some(AvailabilityStatus::Available(message)) => rsx! {
            small { class: "availability availability--ok", "✓ {message}" }
        },
        Some(AvailabilityStatus::Taken(message)) => rsx! {
            small { class: "availability availability--taken", "✗ {message}" }
        },
        Some(AvailabilityStatus::Unknown) | None => rsx! {},
    }
}
