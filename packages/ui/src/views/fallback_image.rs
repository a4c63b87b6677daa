use dioxus::prelude::*;

/// Shown in place of images the server cannot deliver.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='240' height='180'><rect width='100%' height='100%' fill='%23e5e7eb'/><text x='50%' y='50%' fill='%236b7280' font-family='sans-serif' font-size='14' text-anchor='middle'>Image unavailable</text></svg>";

/// An `<img>` that swaps to [`PLACEHOLDER_IMAGE`] after a load error.
///
/// Give it a `key` tied to `src` so a new source gets a fresh attempt.
#[component]
pub fn FallbackImage(
    src: String,
    #[props(default)] alt: String,
    #[props(default)] class: String,
    #[props(default)] onclick: Option<EventHandler<()>>,
) -> Element {
    let mut failed = use_signal(|| false);
    let shown = if failed() { PLACEHOLDER_IMAGE.to_string() } else { src.clone() };

    rsx! {
        img {
            class: "{class}",
            src: "{shown}",
            alt: "{alt}",
            onerror: move |_| {
                if !failed() {
                    tracing::debug!("Image failed to load: {}", src);
                    failed.set(true);
                }
            },
            onclick: move |_| {
                if let Some(handler) = onclick {
                    handler.call(());
                }
            },
        }
    }
}
