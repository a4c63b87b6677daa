use api::Upload;
use dioxus::prelude::*;

use crate::browser::{use_escape_key, use_page_hide};
use crate::camera::{platform, CameraExit, CameraHandle, CAPTURE_FILE_NAME};
use crate::cancel::use_cancellation;
use crate::icons::{FaCamera, FaXmark};
use crate::Icon;

const VIDEO_ID: &str = "camera-preview";

/// Live camera preview with capture and cancel.
///
/// The stream is opened after mount and released through the shared
/// [`CameraHandle`] on capture, cancel (button or Escape), unmount and page hide.
#[component]
pub fn CameraCapture(on_capture: EventHandler<Upload>, on_close: EventHandler<()>) -> Element {
    let camera = use_hook(CameraHandle::<platform::PlatformTrack>::new);
    let mut ready = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let token = use_cancellation();

    use_effect({
        let camera = camera.clone();
        move || {
            let camera = camera.clone();
            let token = token.clone();
            spawn(async move {
                match token.guard(platform::open(VIDEO_ID)).await {
                    Some(Ok(session)) => {
                        camera.attach(session);
                        ready.set(true);
                    }
                    Some(Err(e)) => {
                        tracing::warn!("Camera unavailable: {}", e);
                        error.set(Some(e.to_string()));
                    }
                    None => {}
                }
            });
        }
    });

    use_escape_key({
        let camera = camera.clone();
        move || {
            camera.close(CameraExit::Cancelled);
            on_close.call(());
        }
    });
    use_page_hide({
        let camera = camera.clone();
        move || camera.close(CameraExit::PageHidden)
    });
    use_drop({
        let camera = camera.clone();
        move || camera.close(CameraExit::Unmounted)
    });

    let capture = {
        let camera = camera.clone();
        move |_| match platform::capture_frame(VIDEO_ID) {
            Ok(bytes) => {
                camera.close(CameraExit::Captured);
                if let Some(upload) = Upload::image(CAPTURE_FILE_NAME, bytes) {
                    on_capture.call(upload);
                }
            }
            Err(e) => {
                tracing::warn!("Capture failed: {}", e);
                error.set(Some(e.to_string()));
            }
        }
    };
    let cancel = move |_| {
        camera.close(CameraExit::Cancelled);
        on_close.call(());
    };

    rsx! {
        div {
            class: "camera",
            video {
                id: VIDEO_ID,
                class: "camera-video",
                autoplay: true,
                playsinline: true,
                muted: true,
            }
            if let Some(message) = error() {
                p { class: "status status--error", "{message}" }
            }
            div {
                class: "camera-actions",
                button {
                    class: "btn btn-primary",
                    disabled: !ready(),
                    onclick: capture,
                    Icon { icon: FaCamera, width: 14, height: 14 }
                    " Capture"
                }
                button {
                    class: "btn btn-outline",
                    onclick: cancel,
                    Icon { icon: FaXmark, width: 14, height: 14 }
                    " Cancel"
                }
            }
        }
    }
}
