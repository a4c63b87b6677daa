//! # Camera capture
//!
//! A [`CameraSession`] owns the tracks of one live media stream. Every way of
//! leaving the capture view (capturing a frame, cancelling with the button or
//! Escape, unmounting, page teardown) ends in [`CameraSession::release`],
//! which stops each track once. Dropping the session releases it too.
//!
//! A capture view keeps its session in a [`CameraHandle`], shared between the
//! open task, button handlers and window listeners, so whichever path fires
//! first releases the stream and the others find nothing left to stop.
//!
//! Browser specifics (getUserMedia, drawing the video frame to a canvas,
//! JPEG encoding) live in [`platform`]. Frames leave the canvas as a data URL
//! and are turned back into bytes by [`decode_data_url`]. Off the web,
//! `platform::open` always reports [`CameraError::Unsupported`].

use std::cell::RefCell;
use std::rc::Rc;

use base64::Engine;
use thiserror::Error;

/// File name given to captured frames.
pub const CAPTURE_FILE_NAME: &str = "camera-capture.jpg";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CameraError {
    #[error("Camera is not available on this device")]
    Unsupported,
    #[error("Camera access was denied or failed: {0}")]
    Access(String),
    #[error("Could not capture a frame: {0}")]
    Capture(String),
}

/// One stoppable track of a media stream.
pub trait MediaTrack {
    fn stop(&self);
    fn is_live(&self) -> bool;
}

/// Why a capture view closed, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraExit {
    Captured,
    Cancelled,
    Unmounted,
    PageHidden,
}

#[derive(Debug)]
pub struct CameraSession<T: MediaTrack> {
    tracks: Vec<T>,
}

impl<T: MediaTrack> CameraSession<T> {
    pub fn new(tracks: Vec<T>) -> Self {
        Self { tracks }
    }

    pub fn live_tracks(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_live()).count()
    }

    /// Stop every track. Idempotent.
    pub fn release(&mut self) {
        for track in self.tracks.drain(..) {
            track.stop();
        }
    }

    pub fn close(&mut self, exit: CameraExit) {
        if !self.tracks.is_empty() {
            tracing::debug!("Releasing camera ({:?})", exit);
        }
        self.release();
    }
}

impl<T: MediaTrack> Drop for CameraSession<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Shared slot for the session of one capture view.
pub struct CameraHandle<T: MediaTrack> {
    slot: Rc<RefCell<Option<CameraSession<T>>>>,
}

impl<T: MediaTrack> Clone for CameraHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T: MediaTrack> Default for CameraHandle<T> {
    fn default() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }
}

impl<T: MediaTrack> CameraHandle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly opened session, releasing any previous one.
    pub fn attach(&self, session: CameraSession<T>) {
        let previous = self.slot.borrow_mut().replace(session);
        drop(previous);
    }

    pub fn is_open(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Release the stream, if any. Safe to call from every exit path.
    pub fn close(&self, exit: CameraExit) {
        let session = self.slot.borrow_mut().take();
        if let Some(mut session) = session {
            session.close(exit);
        }
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL into bytes.
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    base64::engine::general_purpose::STANDARD.decode(payload).ok()
}

#[cfg(target_arch = "wasm32")]
pub mod platform {
    //! getUserMedia / canvas plumbing.

    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
        MediaStreamConstraints, MediaStreamTrack, MediaStreamTrackState,
    };

    use super::{decode_data_url, CameraError, CameraSession, MediaTrack};

    impl MediaTrack for MediaStreamTrack {
        fn stop(&self) {
            MediaStreamTrack::stop(self);
        }

        fn is_live(&self) -> bool {
            self.ready_state() == MediaStreamTrackState::Live
        }
    }

    pub type PlatformTrack = MediaStreamTrack;
    pub type WebCameraSession = CameraSession<MediaStreamTrack>;

    fn js_err(e: JsValue) -> String {
        e.as_string().unwrap_or_else(|| format!("{e:?}"))
    }

    fn video_element(id: &str) -> Result<HtmlVideoElement, CameraError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
            .ok_or_else(|| CameraError::Capture(format!("no video element #{id}")))
    }

    /// Ask for the camera and attach the stream to the `<video>` with `video_id`.
    pub async fn open(video_id: &str) -> Result<WebCameraSession, CameraError> {
        let window = web_sys::window().ok_or(CameraError::Unsupported)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| CameraError::Unsupported)?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        constraints.set_audio(&JsValue::FALSE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| CameraError::Access(js_err(e)))?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| CameraError::Access(js_err(e)))?
            .dyn_into()
            .map_err(|_| CameraError::Access("not a media stream".to_string()))?;

        let tracks: Vec<MediaStreamTrack> = stream
            .get_tracks()
            .iter()
            .filter_map(|t| t.dyn_into::<MediaStreamTrack>().ok())
            .collect();
        let session = CameraSession::new(tracks);

        let video = video_element(video_id)?;
        video.set_src_object(Some(&stream));
        if let Ok(play) = video.play() {
            let _ = JsFuture::from(play).await;
        }
        Ok(session)
    }

    /// Draw the current frame of `video_id` to an offscreen canvas and encode it as JPEG.
    pub fn capture_frame(video_id: &str) -> Result<Vec<u8>, CameraError> {
        let video = video_element(video_id)?;
        let (width, height) = (video.video_width(), video.video_height());
        if width == 0 || height == 0 {
            return Err(CameraError::Capture("video not ready".to_string()));
        }

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(CameraError::Unsupported)?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| CameraError::Capture(js_err(e)))?
            .dyn_into()
            .map_err(|_| CameraError::Capture("not a canvas".to_string()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| CameraError::Capture(js_err(e)))?
            .ok_or_else(|| CameraError::Capture("no 2d context".to_string()))?
            .dyn_into()
            .map_err(|_| CameraError::Capture("not a 2d context".to_string()))?;
        context
            .draw_image_with_html_video_element(&video, 0.0, 0.0)
            .map_err(|e| CameraError::Capture(js_err(e)))?;

        let url = canvas
            .to_data_url_with_type("image/jpeg")
            .map_err(|e| CameraError::Capture(js_err(e)))?;
        decode_data_url(&url).ok_or_else(|| CameraError::Capture("bad frame encoding".to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod platform {
    use super::{CameraError, CameraSession, MediaTrack};

    /// No camera off the web; this type has no values.
    pub enum PlatformTrack {}

    impl MediaTrack for PlatformTrack {
        fn stop(&self) {
            match *self {}
        }

        fn is_live(&self) -> bool {
            match *self {}
        }
    }

    pub async fn open(_video_id: &str) -> Result<CameraSession<PlatformTrack>, CameraError> {
        Err(CameraError::Unsupported)
    }

    pub fn capture_frame(_video_id: &str) -> Result<Vec<u8>, CameraError> {
        Err(CameraError::Unsupported)
    }
}
