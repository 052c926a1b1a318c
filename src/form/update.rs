//! Typed field updates.
//!
//! [`FieldUpdate`] has one variant per profile field, so the value carried by
//! an update always has the field's declared type. Applying an update is a
//! pure function from one [`ProfileConfig`] to the next.
//!
//! Hosts that only have untyped `(name, text)` pairs go through
//! [`FieldUpdate::parse`], which is the single place type mismatches are
//! reported.

use std::collections::BTreeSet;
use thiserror::Error;

use super::field::{FieldKey, FieldKind};
use crate::profile::{
    BrowserType, CanvasMode, Country, GeolocationMode, Language, NoiseLevel, OperatingSystem,
    PluginExecutionPolicy, ProfileConfig, ProfileStatus, ProxyType, ScreenResolution,
    SpoofLevel, Timezone, UnknownOption, WebRtcMode,
};

/// Errors from turning untyped input into a [`FieldUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    /// The name does not match any profile field.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A toggle received something other than a boolean.
    #[error("Field {field} expects true or false, got: {value}")]
    InvalidFlag { field: FieldKey, value: String },

    /// A slider received something other than an integer.
    #[error("Field {field} expects an integer, got: {value}")]
    InvalidLevel { field: FieldKey, value: String },

    /// The spoken-language set would end up empty.
    #[error("Field {0} needs at least one entry")]
    EmptySelection(FieldKey),

    /// A select received a value outside its option set.
    #[error("Field {field}: {source}")]
    InvalidChoice {
        field: FieldKey,
        #[source]
        source: UnknownOption,
    },
}

/// Replacement of a single profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    // Overview
    ProfileName(String),
    Description(String),
    Status(ProfileStatus),
    BrowserType(BrowserType),
    OperatingSystem(OperatingSystem),
    ScreenResolution(ScreenResolution),
    QuickLanguage(Language),

    // Proxy
    EnableProxy(bool),
    ProxyType(ProxyType),
    ProxyServer(String),
    ProxyPort(String),
    ProxyAuth(bool),
    ProxyUsername(String),
    ProxyPassword(String),

    // Timezone
    Timezone(Timezone),
    Geolocation(GeolocationMode),
    CustomLat(String),
    CustomLng(String),
    Languages(BTreeSet<String>),
    Country(Country),

    // WebRTC
    WebRtcMode(WebRtcMode),
    IpLeakProtection(bool),
    CustomIp(String),
    DisableWebRtc(bool),

    // Canvas
    CanvasProtection(bool),
    CanvasMode(CanvasMode),
    ClientRectsProtection(bool),
    CanvasSpoofingLevel(SpoofLevel),

    // WebGL
    WebGlProtection(bool),
    VendorSpoofing(String),
    RendererSpoofing(String),
    ImageHashNoiseLevel(NoiseLevel),

    // Audio
    AudioProtection(bool),
    AudioNoiseLevel(NoiseLevel),
    AudioDeviceSpoofing(bool),

    // Fonts
    FontProtection(bool),
    AllowedFonts(Vec<String>),
    BlockUnlistedFonts(bool),

    // Media
    CameraAccess(bool),
    MicrophoneAccess(bool),
    DeviceCountSpoofing(String),
    MediaDeviceIds(String),

    // Storage
    LocalStorage(bool),
    SessionStorage(bool),
    IndexedDb(bool),
    StorageQuota(String),

    // Bookmarks
    DefaultBookmarks(Vec<String>),
    BookmarkFolders(Vec<String>),

    // Extensions
    EnableExtensions(bool),
    InstalledExtensions(Vec<String>),
    PrivacyExtensions(BTreeSet<String>),

    // Plugins
    EnablePlugins(bool),
    AllowedPlugins(BTreeSet<String>),
    BlockUnlistedPlugins(bool),
    PluginExecutionPolicy(PluginExecutionPolicy),
}

impl FieldUpdate {
    /// The field this update replaces.
    pub fn key(&self) -> FieldKey {
        use FieldUpdate as U;
        match self {
            U::ProfileName(_) => FieldKey::ProfileName,
            U::Description(_) => FieldKey::Description,
            U::Status(_) => FieldKey::Status,
            U::BrowserType(_) => FieldKey::BrowserType,
            U::OperatingSystem(_) => FieldKey::OperatingSystem,
            U::ScreenResolution(_) => FieldKey::ScreenResolution,
            U::QuickLanguage(_) => FieldKey::QuickLanguage,
            U::EnableProxy(_) => FieldKey::EnableProxy,
            U::ProxyType(_) => FieldKey::ProxyType,
            U::ProxyServer(_) => FieldKey::ProxyServer,
            U::ProxyPort(_) => FieldKey::ProxyPort,
            U::ProxyAuth(_) => FieldKey::ProxyAuth,
            U::ProxyUsername(_) => FieldKey::ProxyUsername,
            U::ProxyPassword(_) => FieldKey::ProxyPassword,
            U::Timezone(_) => FieldKey::Timezone,
            U::Geolocation(_) => FieldKey::Geolocation,
            U::CustomLat(_) => FieldKey::CustomLat,
            U::CustomLng(_) => FieldKey::CustomLng,
            U::Languages(_) => FieldKey::Languages,
            U::Country(_) => FieldKey::Country,
            U::WebRtcMode(_) => FieldKey::WebRtcMode,
            U::IpLeakProtection(_) => FieldKey::IpLeakProtection,
            U::CustomIp(_) => FieldKey::CustomIp,
            U::DisableWebRtc(_) => FieldKey::DisableWebRtc,
            U::CanvasProtection(_) => FieldKey::CanvasProtection,
            U::CanvasMode(_) => FieldKey::CanvasMode,
            U::ClientRectsProtection(_) => FieldKey::ClientRectsProtection,
            U::CanvasSpoofingLevel(_) => FieldKey::CanvasSpoofingLevel,
            U::WebGlProtection(_) => FieldKey::WebGlProtection,
            U::VendorSpoofing(_) => FieldKey::VendorSpoofing,
            U::RendererSpoofing(_) => FieldKey::RendererSpoofing,
            U::ImageHashNoiseLevel(_) => FieldKey::ImageHashNoiseLevel,
            U::AudioProtection(_) => FieldKey::AudioProtection,
            U::AudioNoiseLevel(_) => FieldKey::AudioNoiseLevel,
            U::AudioDeviceSpoofing(_) => FieldKey::AudioDeviceSpoofing,
            U::FontProtection(_) => FieldKey::FontProtection,
            U::AllowedFonts(_) => FieldKey::AllowedFonts,
            U::BlockUnlistedFonts(_) => FieldKey::BlockUnlistedFonts,
            U::CameraAccess(_) => FieldKey::CameraAccess,
            U::MicrophoneAccess(_) => FieldKey::MicrophoneAccess,
            U::DeviceCountSpoofing(_) => FieldKey::DeviceCountSpoofing,
            U::MediaDeviceIds(_) => FieldKey::MediaDeviceIds,
            U::LocalStorage(_) => FieldKey::LocalStorage,
            U::SessionStorage(_) => FieldKey::SessionStorage,
            U::IndexedDb(_) => FieldKey::IndexedDb,
            U::StorageQuota(_) => FieldKey::StorageQuota,
            U::DefaultBookmarks(_) => FieldKey::DefaultBookmarks,
            U::BookmarkFolders(_) => FieldKey::BookmarkFolders,
            U::EnableExtensions(_) => FieldKey::EnableExtensions,
            U::InstalledExtensions(_) => FieldKey::InstalledExtensions,
            U::PrivacyExtensions(_) => FieldKey::PrivacyExtensions,
            U::EnablePlugins(_) => FieldKey::EnablePlugins,
            U::AllowedPlugins(_) => FieldKey::AllowedPlugins,
            U::BlockUnlistedPlugins(_) => FieldKey::BlockUnlistedPlugins,
            U::PluginExecutionPolicy(_) => FieldKey::PluginExecutionPolicy,
        }
    }

    /// Builds an update from a field name and its textual value.
    ///
    /// Text fields take the input verbatim. Toggles accept
    /// `true/false/1/0/yes/no/on/off`. Sliders take an integer and clamp it.
    /// Lists and selections take a comma separated list; blank entries are
    /// dropped. A language list with no entries left is rejected, the same
    /// way removing the last language is refused.
    ///
    /// # Example
    ///
    /// ```rust
    /// use profile_form::form::{FieldKey, FieldUpdate};
    ///
    /// let update = FieldUpdate::parse(FieldKey::EnableProxy, "true").unwrap();
    /// assert_eq!(update, FieldUpdate::EnableProxy(true));
    /// assert!(FieldUpdate::parse(FieldKey::EnableProxy, "maybe").is_err());
    /// ```
    pub fn parse(key: FieldKey, raw: &str) -> Result<Self, UpdateError> {
        use FieldUpdate as U;

        let text = || raw.to_string();
        let flag = || parse_flag(key, raw);
        let level = || parse_level(key, raw);
        let list = || parse_list(raw).collect::<Vec<_>>();
        let set = || parse_list(raw).collect::<BTreeSet<_>>();

        Ok(match key {
            FieldKey::ProfileName => U::ProfileName(text()),
            FieldKey::Description => U::Description(text()),
            FieldKey::Status => U::Status(parse_choice(key, raw)?),
            FieldKey::BrowserType => U::BrowserType(parse_choice(key, raw)?),
            FieldKey::OperatingSystem => U::OperatingSystem(parse_choice(key, raw)?),
            FieldKey::ScreenResolution => U::ScreenResolution(ScreenResolution::from(text())),
            FieldKey::QuickLanguage => U::QuickLanguage(parse_choice(key, raw)?),

            FieldKey::EnableProxy => U::EnableProxy(flag()?),
            FieldKey::ProxyType => U::ProxyType(parse_choice(key, raw)?),
            FieldKey::ProxyServer => U::ProxyServer(text()),
            FieldKey::ProxyPort => U::ProxyPort(text()),
            FieldKey::ProxyAuth => U::ProxyAuth(flag()?),
            FieldKey::ProxyUsername => U::ProxyUsername(text()),
            FieldKey::ProxyPassword => U::ProxyPassword(text()),

            FieldKey::Timezone => U::Timezone(parse_choice(key, raw)?),
            FieldKey::Geolocation => U::Geolocation(parse_choice(key, raw)?),
            FieldKey::CustomLat => U::CustomLat(text()),
            FieldKey::CustomLng => U::CustomLng(text()),
            FieldKey::Languages => {
                let languages = set();
                if languages.is_empty() {
                    return Err(UpdateError::EmptySelection(key));
                }
                U::Languages(languages)
            }
            FieldKey::Country => U::Country(parse_choice(key, raw)?),

            FieldKey::WebRtcMode => U::WebRtcMode(parse_choice(key, raw)?),
            FieldKey::IpLeakProtection => U::IpLeakProtection(flag()?),
            FieldKey::CustomIp => U::CustomIp(text()),
            FieldKey::DisableWebRtc => U::DisableWebRtc(flag()?),

            FieldKey::CanvasProtection => U::CanvasProtection(flag()?),
            FieldKey::CanvasMode => U::CanvasMode(parse_choice(key, raw)?),
            FieldKey::ClientRectsProtection => U::ClientRectsProtection(flag()?),
            FieldKey::CanvasSpoofingLevel => U::CanvasSpoofingLevel(SpoofLevel::new(level()?)),

            FieldKey::WebGlProtection => U::WebGlProtection(flag()?),
            FieldKey::VendorSpoofing => U::VendorSpoofing(text()),
            FieldKey::RendererSpoofing => U::RendererSpoofing(text()),
            FieldKey::ImageHashNoiseLevel => U::ImageHashNoiseLevel(NoiseLevel::new(level()?)),

            FieldKey::AudioProtection => U::AudioProtection(flag()?),
            FieldKey::AudioNoiseLevel => U::AudioNoiseLevel(NoiseLevel::new(level()?)),
            FieldKey::AudioDeviceSpoofing => U::AudioDeviceSpoofing(flag()?),

            FieldKey::FontProtection => U::FontProtection(flag()?),
            FieldKey::AllowedFonts => U::AllowedFonts(list()),
            FieldKey::BlockUnlistedFonts => U::BlockUnlistedFonts(flag()?),

            FieldKey::CameraAccess => U::CameraAccess(flag()?),
            FieldKey::MicrophoneAccess => U::MicrophoneAccess(flag()?),
            FieldKey::DeviceCountSpoofing => U::DeviceCountSpoofing(text()),
            FieldKey::MediaDeviceIds => U::MediaDeviceIds(text()),

            FieldKey::LocalStorage => U::LocalStorage(flag()?),
            FieldKey::SessionStorage => U::SessionStorage(flag()?),
            FieldKey::IndexedDb => U::IndexedDb(flag()?),
            FieldKey::StorageQuota => U::StorageQuota(text()),

            FieldKey::DefaultBookmarks => U::DefaultBookmarks(list()),
            FieldKey::BookmarkFolders => U::BookmarkFolders(list()),

            FieldKey::EnableExtensions => U::EnableExtensions(flag()?),
            FieldKey::InstalledExtensions => U::InstalledExtensions(list()),
            FieldKey::PrivacyExtensions => U::PrivacyExtensions(set()),

            FieldKey::EnablePlugins => U::EnablePlugins(flag()?),
            FieldKey::AllowedPlugins => U::AllowedPlugins(set()),
            FieldKey::BlockUnlistedPlugins => U::BlockUnlistedPlugins(flag()?),
            FieldKey::PluginExecutionPolicy => U::PluginExecutionPolicy(parse_choice(key, raw)?),
        })
    }

    /// Like [`FieldUpdate::parse`], but takes the field's wire name.
    pub fn parse_named(name: &str, raw: &str) -> Result<Self, UpdateError> {
        let key = name
            .trim()
            .parse::<FieldKey>()
            .map_err(|_| UpdateError::UnknownField(name.to_string()))?;
        Self::parse(key, raw)
    }
}

fn parse_flag(field: FieldKey, raw: &str) -> Result<bool, UpdateError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(UpdateError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_level(field: FieldKey, raw: &str) -> Result<i64, UpdateError> {
    raw.trim().parse().map_err(|_| UpdateError::InvalidLevel {
        field,
        value: raw.to_string(),
    })
}

fn parse_choice<T>(field: FieldKey, raw: &str) -> Result<T, UpdateError>
where
    T: std::str::FromStr<Err = UnknownOption>,
{
    debug_assert_eq!(field.kind(), FieldKind::Choice);
    raw.parse()
        .map_err(|source| UpdateError::InvalidChoice { field, source })
}

fn parse_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

impl ProfileConfig {
    /// Returns a copy of this profile with one field replaced.
    ///
    /// Every other field of the result equals the corresponding field of
    /// `self`.
    pub fn with(&self, update: FieldUpdate) -> ProfileConfig {
        let mut next = self.clone();
        next.apply(update);
        next
    }

    fn apply(&mut self, update: FieldUpdate) {
        use FieldUpdate as U;
        match update {
            U::ProfileName(v) => self.identity.profile_name = v,
            U::Description(v) => self.identity.description = v,
            U::Status(v) => self.identity.status = v,
            U::BrowserType(v) => self.identity.browser_type = v,
            U::OperatingSystem(v) => self.identity.operating_system = v,
            U::ScreenResolution(v) => self.identity.screen_resolution = v,
            U::QuickLanguage(v) => self.identity.quick_language = v,

            U::EnableProxy(v) => self.proxy.enabled = v,
            U::ProxyType(v) => self.proxy.proxy_type = v,
            U::ProxyServer(v) => self.proxy.server = v,
            U::ProxyPort(v) => self.proxy.port = v,
            U::ProxyAuth(v) => self.proxy.auth_enabled = v,
            U::ProxyUsername(v) => self.proxy.username = v,
            U::ProxyPassword(v) => self.proxy.password = v,

            U::Timezone(v) => self.locale.timezone = v,
            U::Geolocation(v) => self.locale.geolocation = v,
            U::CustomLat(v) => self.locale.custom_lat = v,
            U::CustomLng(v) => self.locale.custom_lng = v,
            U::Languages(v) => self.locale.languages = v,
            U::Country(v) => self.locale.country = v,

            U::WebRtcMode(v) => self.webrtc.mode = v,
            U::IpLeakProtection(v) => self.webrtc.ip_leak_protection = v,
            U::CustomIp(v) => self.webrtc.custom_ip = v,
            U::DisableWebRtc(v) => self.webrtc.disabled = v,

            U::CanvasProtection(v) => self.canvas.protection = v,
            U::CanvasMode(v) => self.canvas.mode = v,
            U::ClientRectsProtection(v) => self.canvas.client_rects_protection = v,
            U::CanvasSpoofingLevel(v) => self.canvas.spoofing_level = v,

            U::WebGlProtection(v) => self.webgl.protection = v,
            U::VendorSpoofing(v) => self.webgl.vendor = v,
            U::RendererSpoofing(v) => self.webgl.renderer = v,
            U::ImageHashNoiseLevel(v) => self.webgl.image_hash_noise_level = v,

            U::AudioProtection(v) => self.audio.protection = v,
            U::AudioNoiseLevel(v) => self.audio.noise_level = v,
            U::AudioDeviceSpoofing(v) => self.audio.device_spoofing = v,

            U::FontProtection(v) => self.fonts.protection = v,
            U::AllowedFonts(v) => self.fonts.allowed = v,
            U::BlockUnlistedFonts(v) => self.fonts.block_unlisted = v,

            U::CameraAccess(v) => self.media.camera_access = v,
            U::MicrophoneAccess(v) => self.media.microphone_access = v,
            U::DeviceCountSpoofing(v) => self.media.device_count = v,
            U::MediaDeviceIds(v) => self.media.device_ids = v,

            U::LocalStorage(v) => self.storage.local_storage = v,
            U::SessionStorage(v) => self.storage.session_storage = v,
            U::IndexedDb(v) => self.storage.indexed_db = v,
            U::StorageQuota(v) => self.storage.quota_mb = v,

            U::DefaultBookmarks(v) => self.bookmarks.defaults = v,
            U::BookmarkFolders(v) => self.bookmarks.folders = v,

            U::EnableExtensions(v) => self.extensions.enabled = v,
            U::InstalledExtensions(v) => self.extensions.installed = v,
            U::PrivacyExtensions(v) => self.extensions.privacy = v,

            U::EnablePlugins(v) => self.plugins.enabled = v,
            U::AllowedPlugins(v) => self.plugins.allowed = v,
            U::BlockUnlistedPlugins(v) => self.plugins.block_unlisted = v,
            U::PluginExecutionPolicy(v) => self.plugins.execution_policy = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldValue;

    #[test]
    fn test_with_replaces_only_target_field() {
        let before = ProfileConfig::default();
        let after = before.with(FieldUpdate::ProxyPort("8080".to_string()));

        assert_eq!(after.proxy.port, "8080");
        for key in FieldKey::ALL.iter().filter(|k| **k != FieldKey::ProxyPort) {
            assert_eq!(before.get(*key), after.get(*key), "{} changed", key);
        }
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let before = ProfileConfig::default();
        let _ = before.with(FieldUpdate::ProfileName("Work".to_string()));
        assert_eq!(before.identity.profile_name, "Default Profile");
    }

    #[test]
    fn test_parse_reads_back_for_every_field() {
        let profile = ProfileConfig::default();
        for key in FieldKey::ALL {
            let (raw, expected) = match key.kind() {
                FieldKind::Text => ("sample text", FieldValue::Text("sample text".to_string())),
                FieldKind::Flag => ("true", FieldValue::Flag(true)),
                FieldKind::Level => ("4", FieldValue::Level(4)),
                FieldKind::List => ("a, b", FieldValue::List(vec!["a".into(), "b".into()])),
                FieldKind::Selection => {
                    ("x,y", FieldValue::Selection(vec!["x".into(), "y".into()]))
                }
                FieldKind::Choice => {
                    let last = *key.options().last().unwrap();
                    (last, FieldValue::Choice(last.to_string()))
                }
            };
            let update = FieldUpdate::parse(*key, raw).unwrap();
            assert_eq!(update.key(), *key);

            let after = profile.with(update);
            assert_eq!(after.get(*key), expected, "{}", key);
            for other in FieldKey::ALL.iter().filter(|other| *other != key) {
                assert_eq!(after.get(*other), profile.get(*other), "{} touched {}", key, other);
            }
        }
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(
            FieldUpdate::parse(FieldKey::ProxyType, "socks5").unwrap(),
            FieldUpdate::ProxyType(ProxyType::Socks5)
        );
        assert_eq!(
            FieldUpdate::parse(FieldKey::Geolocation, "manual").unwrap(),
            FieldUpdate::Geolocation(GeolocationMode::Manual)
        );
        assert_eq!(
            FieldUpdate::parse(FieldKey::ScreenResolution, "3440x1440").unwrap(),
            FieldUpdate::ScreenResolution(ScreenResolution::Custom("3440x1440".into()))
        );

        let err = FieldUpdate::parse(FieldKey::Country, "XX").unwrap_err();
        assert!(matches!(
            err,
            UpdateError::InvalidChoice { field: FieldKey::Country, .. }
        ));
    }

    #[test]
    fn test_parse_levels_clamp() {
        assert_eq!(
            FieldUpdate::parse(FieldKey::CanvasSpoofingLevel, "0").unwrap(),
            FieldUpdate::CanvasSpoofingLevel(SpoofLevel::new(1))
        );
        assert_eq!(
            FieldUpdate::parse(FieldKey::AudioNoiseLevel, "99").unwrap(),
            FieldUpdate::AudioNoiseLevel(NoiseLevel::new(5))
        );
        assert!(matches!(
            FieldUpdate::parse(FieldKey::AudioNoiseLevel, "loud"),
            Err(UpdateError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_language_set() {
        for raw in ["", " , ", ","] {
            assert_eq!(
                FieldUpdate::parse(FieldKey::Languages, raw).unwrap_err(),
                UpdateError::EmptySelection(FieldKey::Languages)
            );
        }
        assert_eq!(
            FieldUpdate::parse(FieldKey::PrivacyExtensions, "").unwrap(),
            FieldUpdate::PrivacyExtensions(BTreeSet::new())
        );
    }

    #[test]
    fn test_text_fields_are_permissive() {
        let update = FieldUpdate::parse(FieldKey::ProxyPort, "not-a-port").unwrap();
        assert_eq!(update, FieldUpdate::ProxyPort("not-a-port".to_string()));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(
            FieldUpdate::parse_named("enableProxy", "on").unwrap(),
            FieldUpdate::EnableProxy(true)
        );
        assert_eq!(
            FieldUpdate::parse_named("bogus", "1").unwrap_err(),
            UpdateError::UnknownField("bogus".to_string())
        );
    }
}
