//! # Client configuration: `veriai.toml`
//!
//! The web client ships with a bundled `veriai.toml` (see [`ClientConfig::load`])
//! describing where the detection backend lives and how long the cosmetic UI
//! delays last.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//! static_url = "http://localhost:8000/static/"
//!
//! [timing]
//! availability_debounce_ms = 500
//! analysis_autostart_ms = 300
//! stage_floor_ms = 600
//! success_close_ms = 1000
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation and the bundled loader. |
//! | [`ApiConfig`] | Backend REST base URL and the static-asset prefix for uploaded images. |
//! | [`TimingConfig`] | Debounce window, auto-start delay, stage display floor, modal auto-close delay. |
//!
//! Every section defaults, so an empty file equals [`ClientConfig::default`].
//! The `VERIAI_API_URL` environment variable, read at build time, overrides
//! `api.base_url`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const BUNDLED: &str = include_str!("../veriai.toml");

/// Top-level configuration stored in `veriai.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST base URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix joined with an analysis record's `image_path`.
    #[serde(default = "default_static_url")]
    pub static_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_static_url() -> String {
    "http://localhost:8000/static/".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            static_url: default_static_url(),
        }
    }
}

/// UI delays, all in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_availability_debounce")]
    pub availability_debounce_ms: u64,
    #[serde(default = "default_analysis_autostart")]
    pub analysis_autostart_ms: u64,
    /// Minimum time each analysis stage label stays on screen.
    #[serde(default = "default_stage_floor")]
    pub stage_floor_ms: u64,
    #[serde(default = "default_success_close")]
    pub success_close_ms: u64,
}

fn default_availability_debounce() -> u64 {
    500
}

fn default_analysis_autostart() -> u64 {
    300
}

fn default_stage_floor() -> u64 {
    600
}

fn default_success_close() -> u64 {
    1000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            availability_debounce_ms: default_availability_debounce(),
            analysis_autostart_ms: default_analysis_autostart(),
            stage_floor_ms: default_stage_floor(),
            success_close_ms: default_success_close(),
        }
    }
}

impl TimingConfig {
    pub fn availability_debounce(&self) -> Duration {
        Duration::from_millis(self.availability_debounce_ms)
    }

    pub fn analysis_autostart(&self) -> Duration {
        Duration::from_millis(self.analysis_autostart_ms)
    }

    pub fn stage_floor(&self) -> Duration {
        Duration::from_millis(self.stage_floor_ms)
    }

    pub fn success_close(&self) -> Duration {
        Duration::from_millis(self.success_close_ms)
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "veriai.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load the bundled config, applying the build-time `VERIAI_API_URL` override.
    ///
    /// A malformed bundled file falls back to the defaults.
    pub fn load() -> Self {
        let config = match Self::from_toml(BUNDLED) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Invalid bundled {}: {}", Self::filename(), e);
                Self::default()
            }
        };
        match option_env!("VERIAI_API_URL") {
            Some(url) if !url.is_empty() => config.with_base_url(url),
            _ => config,
        }
    }

    /// Full URL of an uploaded image stored by the backend.
    pub fn static_image_url(&self, image_path: &str) -> String {
        format!(
            "{}{}",
            self.api.static_url,
            image_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.timing.availability_debounce_ms, 500);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://veriai.example/api"

            [timing]
            stage_floor_ms = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://veriai.example/api");
        assert_eq!(config.api.static_url, "http://localhost:8000/static/");
        assert_eq!(config.timing.stage_floor(), Duration::from_millis(100));
        assert_eq!(config.timing.analysis_autostart_ms, 300);
    }

    #[test]
    fn bundled_file_parses() {
        assert!(ClientConfig::from_toml(BUNDLED).is_ok());
    }

    #[test]
    fn base_url_override_trims_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://10.0.0.2:8000/api/");
        assert_eq!(config.api.base_url, "http://10.0.0.2:8000/api");
    }

    #[test]
    fn static_image_url_joins_without_double_slash() {
        let config = ClientConfig::default();
        assert_eq!(
            config.static_image_url("/uploads/cat.png"),
            "http://localhost:8000/static/uploads/cat.png"
        );
        assert_eq!(
            config.static_image_url("cat.png"),
            "http://localhost:8000/static/cat.png"
        );
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let config = ClientConfig::default().with_base_url("http://api.local");
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
