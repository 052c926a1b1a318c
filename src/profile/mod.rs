//! Browser profile data model.
//!
//! A [`ProfileConfig`] is the single record edited by the settings form. It
//! is grouped into one sub-record per form tab:
//!
//! - `identity` - name, status, browser, OS, resolution, quick language
//! - `proxy` - proxy server and credentials
//! - `locale` - timezone, geolocation, languages, country
//! - `webrtc`, `canvas`, `webgl`, `audio`, `fonts` - fingerprinting protections
//! - `media`, `storage` - device and storage exposure
//! - `bookmarks`, `extensions`, `plugins`
//!
//! The protection values are plain configuration; nothing in this crate
//! applies them to a browser.
//!
//! # Example
//!
//! ```rust
//! use profile_form::profile::{CanvasMode, ProfileConfig};
//!
//! let profile = ProfileConfig::default();
//! assert_eq!(profile.identity.profile_name, "Default Profile");
//! assert_eq!(profile.canvas.mode, CanvasMode::Noise);
//! assert!(!profile.proxy.enabled);
//! ```

pub mod level;
pub mod options;
pub mod sections;

pub use level::{Level, NoiseLevel, SpoofLevel};
pub use options::{
    BrowserType, CanvasMode, Country, GeolocationMode, Language, OperatingSystem,
    PluginExecutionPolicy, ProfileStatus, ProxyType, ResolutionPreset, ScreenResolution,
    Timezone, UnknownOption, WebRtcMode,
};
pub use sections::{
    AudioSettings, BookmarkSettings, CanvasSettings, ExtensionSettings, FontSettings,
    IdentitySettings, LocaleSettings, MediaSettings, PluginSettings, ProxySettings,
    StorageSettings, WebGlSettings, WebRtcSettings,
};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::{ConfigError, OutputFormat};

/// Complete browser profile configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub identity: IdentitySettings,
    pub proxy: ProxySettings,
    pub locale: LocaleSettings,
    pub webrtc: WebRtcSettings,
    pub canvas: CanvasSettings,
    pub webgl: WebGlSettings,
    pub audio: AudioSettings,
    pub fonts: FontSettings,
    pub media: MediaSettings,
    pub storage: StorageSettings,
    pub bookmarks: BookmarkSettings,
    pub extensions: ExtensionSettings,
    pub plugins: PluginSettings,
}

impl ProfileConfig {
    /// Loads a profile from a TOML or JSON file, chosen by extension.
    ///
    /// Sections and fields missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match OutputFormat::from_path(path)? {
            OutputFormat::Toml => Ok(toml::from_str(&content)?),
            OutputFormat::Json => Ok(serde_json::from_str(&content)?),
        }
    }

    /// Renders the profile in the given format.
    pub fn render(&self, format: OutputFormat) -> Result<String, ConfigError> {
        Ok(match format {
            OutputFormat::Toml => toml::to_string_pretty(self)?,
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }
}
