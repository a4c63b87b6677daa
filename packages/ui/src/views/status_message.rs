use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

impl StatusKind {
    fn class(&self) -> &'static str {
        match self {
            StatusKind::Success => "status status--success",
            StatusKind::Error => "status status--error",
            StatusKind::Info => "status status--info",
        }
    }
}

/// Inline banner; renders nothing for an empty message.
#[component]
pub fn StatusMessage(kind: StatusKind, message: Option<String>) -> Element {
    match message {
        Some(text) if !text.is_empty() => rsx! {
            div { class: kind.class(), role: "status", "{text}" }
        },
        _ => rsx! {},
    }
}
