use serde::{Deserialize, Serialize};

/// Binary outcome of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    pub fn from_is_real(is_real: bool) -> Self {
        if is_real {
            Verdict::Real
        } else {
            Verdict::Fake
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Real => "Real",
            Verdict::Fake => "AI-Generated",
        }
    }

    /// Short form used in badges and tables.
    pub fn short_label(&self) -> &'static str {
        match self {
            Verdict::Real => "Real",
            Verdict::Fake => "Fake",
        }
    }

    /// Shown beside an explanation image the backend sent without text.
    pub fn default_explanation(&self) -> &'static str {
        match self {
            Verdict::Real => "The model identified consistent high-frequency texture details and natural lighting physics, which are strong indicators of a camera-captured image.",
            Verdict::Fake => "The model detected tell-tale signs of synthesis, such as unnatural smoothness, lack of fine grain, or structural inconsistencies common in generative models.",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Verdict::Real => "verdict-real",
            Verdict::Fake => "verdict-fake",
        }
    }
}

/// Response of `POST /predict`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Prediction {
    #[serde(rename = "isReal")]
    pub is_real: bool,
    pub confidence: f64,
    #[serde(default)]
    pub real_prob: Option<f64>,
    #[serde(default)]
    pub fake_prob: Option<f64>,
    /// Explanation visualisation, base64 PNG.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Prediction {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_is_real(self.is_real)
    }

    /// Explanation image as an `<img src>`-ready data URL.
    pub fn explanation_url(&self) -> Option<String> {
        self.image.as_deref().and_then(explanation_data_url)
    }

    /// The backend's explanation, or the verdict's stock wording when only an
    /// explanation image came back.
    pub fn explanation_text(&self) -> Option<String> {
        match self.explanation.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(text.to_string()),
            _ => self
                .explanation_url()
                .map(|_| self.verdict().default_explanation().to_string()),
        }
    }
}

/// A stored analysis, as listed by `/history` and `/admin/logs`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AnalysisRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub image_path: String,
    pub is_real: bool,
    pub confidence: f64,
    #[serde(default)]
    pub real_prob: Option<f64>,
    #[serde(default)]
    pub fake_prob: Option<f64>,
    #[serde(default)]
    pub explanation_image: Option<String>,
    #[serde(default)]
    pub explanation_text: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    /// Owner, only present in the admin listing.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AnalysisRecord {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_is_real(self.is_real)
    }

    pub fn explanation_url(&self) -> Option<String> {
        self.explanation_image.as_deref().and_then(explanation_data_url)
    }
}

/// Wrap a base64 PNG payload as a data URL. Payloads that already are data
/// URLs pass through unchanged; empty payloads yield `None`.
pub fn explanation_data_url(payload: &str) -> Option<String> {
    let payload = payload.trim();
    if payload.is_empty() {
        None
    } else if payload.starts_with("data:") {
        Some(payload.to_string())
    } else {
        Some(format!("data:image/png;base64,{payload}"))
    }
}

/// An image file ready to be posted to `/predict`.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Accept a file only if its extension names an image type, or, failing
    /// that, its leading bytes carry a known image signature.
    pub fn image(file_name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let file_name = file_name.into();
        let mime = image_mime(&file_name).or_else(|| sniff_image_mime(&bytes))?;
        Some(Self {
            file_name,
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xff, 0xd8, 0xff, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        _ => None,
    }
}

fn image_mime(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "avif" => Some("image/avif"),
        "tif" | "tiff" => Some("image/tiff"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_reads_camel_case_flag() {
        let p: Prediction = serde_json::from_value(serde_json::json!({
            "success": true,
            "isReal": false,
            "confidence": 87.5,
            "image": "iVBORw0KGgo=",
            "explanation": "Color banding artifacts typical of generative models."
        }))
        .unwrap();
        assert_eq!(p.verdict(), Verdict::Fake);
        assert_eq!(p.real_prob, None);
        assert_eq!(
            p.explanation_url().as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
    }

    #[test]
    fn explanation_text_falls_back_per_verdict() {
        let with_image = |is_real: bool| -> Prediction {
            serde_json::from_value(serde_json::json!({
                "isReal": is_real,
                "confidence": 90.0,
                "image": "iVBORw0KGgo="
            }))
            .unwrap()
        };
        assert_eq!(
            with_image(true).explanation_text().as_deref(),
            Some(Verdict::Real.default_explanation())
        );
        assert_eq!(
            with_image(false).explanation_text().as_deref(),
            Some(Verdict::Fake.default_explanation())
        );

        let mut given = with_image(false);
        given.explanation = Some("Warped text in the background.".into());
        assert_eq!(
            given.explanation_text().as_deref(),
            Some("Warped text in the background.")
        );

        given.image = None;
        given.explanation = Some("  ".into());
        assert_eq!(given.explanation_text(), None);
    }

    #[test]
    fn record_tolerates_missing_optionals() {
        let r: AnalysisRecord = serde_json::from_value(serde_json::json!({
            "image_path": "cat.png",
            "is_real": true,
            "confidence": 91.0
        }))
        .unwrap();
        assert_eq!(r.verdict(), Verdict::Real);
        assert!(r.explanation_url().is_none());
        assert!(r.username.is_none());
    }

    #[test]
    fn upload_accepts_only_images() {
        let upload = Upload::image("Photo.JPG", vec![1, 2, 3]).unwrap();
        assert_eq!(upload.mime, "image/jpeg");
        assert_eq!(upload.len(), 3);

        assert_eq!(Upload::image("scan.TIFF", vec![1]).unwrap().mime, "image/tiff");
        assert_eq!(Upload::image("shot.avif", vec![1]).unwrap().mime, "image/avif");
        assert_eq!(Upload::image("IMG_0001.heic", vec![1]).unwrap().mime, "image/heic");
        assert!(Upload::image("notes.txt", vec![1]).is_none());
        assert!(Upload::image("no_extension", vec![1]).is_none());
        assert_eq!(
            Upload::image("pasted", vec![0x89, b'P', b'N', b'G', 0x0d]).unwrap().mime,
            "image/png"
        );
    }

    #[test]
    fn data_url_passthrough_and_empty() {
        assert_eq!(
            explanation_data_url("data:image/jpeg;base64,AAA").as_deref(),
            Some("data:image/jpeg;base64,AAA")
        );
        assert!(explanation_data_url("  ").is_none());
    }
}
