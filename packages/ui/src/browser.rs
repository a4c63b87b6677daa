//! Window-level hooks and prompts.
//!
//! Listeners registered here are removed when the calling component unmounts.
//! Off the web they are no-ops, and [`confirm`] declines.

use dioxus::prelude::*;

/// Call `handler` whenever Escape is pressed anywhere in the page.
pub fn use_escape_key(handler: impl FnMut() + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        let mut handler = handler;
        use_window_listener("keydown", move |evt| {
            use wasm_bindgen::JsCast;
            if let Some(key) = evt.dyn_ref::<web_sys::KeyboardEvent>() {
                if key.key() == "Escape" {
                    handler();
                }
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = handler;
}

/// Call `handler` when the page is being hidden or torn down.
pub fn use_page_hide(handler: impl FnMut() + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        let mut handler = handler;
        use_window_listener("pagehide", move |_| handler());
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = handler;
}

#[cfg(target_arch = "wasm32")]
fn use_window_listener(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) {
    use std::rc::Rc;
    use wasm_bindgen::prelude::Closure;
    use wasm_bindgen::JsCast;

    let listener = use_hook(move || {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
        Rc::new(closure)
    });

    use_drop(move || {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                event,
                (*listener).as_ref().unchecked_ref(),
            );
        }
    });
}

/// Blocking yes/no prompt for destructive actions.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("No prompt available, declining: {}", message);
        false
    }
}
