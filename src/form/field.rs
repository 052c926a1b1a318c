//! Field catalogue: every editable key of a profile, the tab it lives on,
//! and a read accessor returning its current value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::edit::SelectionField;
use crate::profile::options::form_option;
use crate::profile::{self, ProfileConfig};

form_option! {
    /// Tabs of the settings form, in display order.
    pub enum Section: default Overview {
        Overview => ("overview", "Overview"),
        Proxy => ("proxy", "Proxy"),
        Timezone => ("timezone", "Timezone"),
        WebRtc => ("webrtc", "WebRTC"),
        Canvas => ("canvas", "Canvas"),
        WebGl => ("webgl", "WebGL"),
        Audio => ("audio", "Audio"),
        Fonts => ("fonts", "Fonts"),
        Media => ("media", "Media"),
        Storage => ("storage", "Storage"),
        Bookmarks => ("bookmarks", "Bookmarks"),
        Extensions => ("extensions", "Extensions"),
        Plugins => ("plugins", "Plugins"),
    }
}

form_option! {
    /// Name of a single profile field.
    ///
    /// Wire values are the flat camelCase keys hosts use for string-keyed
    /// updates (`"enableProxy"`, `"proxyPort"`, ...).
    pub enum FieldKey {
        // Overview
        ProfileName => ("profileName", "Profile Name"),
        Description => ("description", "Description"),
        Status => ("status", "Status"),
        BrowserType => ("browserType", "Browser"),
        OperatingSystem => ("operatingSystem", "Operating System"),
        ScreenResolution => ("screenResolution", "Screen Resolution"),
        QuickLanguage => ("quickLanguage", "Language"),

        // Proxy
        EnableProxy => ("enableProxy", "Enable Proxy"),
        ProxyType => ("proxyType", "Proxy Type"),
        ProxyServer => ("proxyServer", "Proxy Server"),
        ProxyPort => ("proxyPort", "Port"),
        ProxyAuth => ("proxyAuth", "Authentication Required"),
        ProxyUsername => ("proxyUsername", "Username"),
        ProxyPassword => ("proxyPassword", "Password"),

        // Timezone
        Timezone => ("timezone", "Timezone"),
        Geolocation => ("geolocation", "Geolocation"),
        CustomLat => ("customLat", "Latitude"),
        CustomLng => ("customLng", "Longitude"),
        Languages => ("languages", "Languages"),
        Country => ("country", "Country"),

        // WebRTC
        WebRtcMode => ("webrtcMode", "WebRTC Mode"),
        IpLeakProtection => ("ipLeakProtection", "IP Leak Protection"),
        CustomIp => ("customIP", "Custom Public IP"),
        DisableWebRtc => ("disableWebRTC", "Disable WebRTC"),

        // Canvas
        CanvasProtection => ("canvasProtection", "Canvas Protection"),
        CanvasMode => ("canvasMode", "Canvas Mode"),
        ClientRectsProtection => ("clientRectsProtection", "ClientRects Protection"),
        CanvasSpoofingLevel => ("canvasSpoofingLevel", "Spoofing Level"),

        // WebGL
        WebGlProtection => ("webglProtection", "WebGL Protection"),
        VendorSpoofing => ("vendorSpoofing", "Vendor"),
        RendererSpoofing => ("rendererSpoofing", "Renderer"),
        ImageHashNoiseLevel => ("imageHashNoiseLevel", "Image Hash Noise Level"),

        // Audio
        AudioProtection => ("audioProtection", "Audio Protection"),
        AudioNoiseLevel => ("audioNoiseLevel", "Noise Level"),
        AudioDeviceSpoofing => ("audioDeviceSpoofing", "Audio Device Spoofing"),

        // Fonts
        FontProtection => ("fontProtection", "Font Protection"),
        AllowedFonts => ("allowedFonts", "Allowed Fonts"),
        BlockUnlistedFonts => ("blockUnlistedFonts", "Block Unlisted Fonts"),

        // Media
        CameraAccess => ("cameraAccess", "Camera Access"),
        MicrophoneAccess => ("microphoneAccess", "Microphone Access"),
        DeviceCountSpoofing => ("deviceCountSpoofing", "Device Count"),
        MediaDeviceIds => ("mediaDeviceIds", "Device IDs"),

        // Storage
        LocalStorage => ("localStorage", "Local Storage"),
        SessionStorage => ("sessionStorage", "Session Storage"),
        IndexedDb => ("indexedDB", "IndexedDB"),
        StorageQuota => ("storageQuota", "Storage Quota (MB)"),

        // Bookmarks
        DefaultBookmarks => ("defaultBookmarks", "Default Bookmarks"),
        BookmarkFolders => ("bookmarkFolders", "Bookmark Folders"),

        // Extensions
        EnableExtensions => ("enableExtensions", "Enable Extensions"),
        InstalledExtensions => ("installedExtensions", "Installed Extensions"),
        PrivacyExtensions => ("privacyExtensions", "Privacy Extensions"),

        // Plugins
        EnablePlugins => ("enablePlugins", "Enable Plugins"),
        AllowedPlugins => ("allowedPlugins", "Allowed Plugins"),
        BlockUnlistedPlugins => ("blockUnlistedPlugins", "Block Unlisted Plugins"),
        PluginExecutionPolicy => ("pluginExecutionPolicy", "Execution Policy"),
    }
}

/// Declared type of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    /// One member of a fixed option set.
    Choice,
    /// Clamped integer slider.
    Level,
    /// Ordered sequence, edited with append/remove.
    List,
    /// Membership set, edited with add/remove.
    Selection,
}

impl FieldKey {
    /// Tab the field is rendered on.
    pub fn section(&self) -> Section {
        use FieldKey::*;
        match self {
            ProfileName | Description | Status | BrowserType | OperatingSystem
            | ScreenResolution | QuickLanguage => Section::Overview,
            EnableProxy | ProxyType | ProxyServer | ProxyPort | ProxyAuth | ProxyUsername
            | ProxyPassword => Section::Proxy,
            Timezone | Geolocation | CustomLat | CustomLng | Languages | Country => {
                Section::Timezone
            }
            WebRtcMode | IpLeakProtection | CustomIp | DisableWebRtc => Section::WebRtc,
            CanvasProtection | CanvasMode | ClientRectsProtection | CanvasSpoofingLevel => {
                Section::Canvas
            }
            WebGlProtection | VendorSpoofing | RendererSpoofing | ImageHashNoiseLevel => {
                Section::WebGl
            }
            AudioProtection | AudioNoiseLevel | AudioDeviceSpoofing => Section::Audio,
            FontProtection | AllowedFonts | BlockUnlistedFonts => Section::Fonts,
            CameraAccess | MicrophoneAccess | DeviceCountSpoofing | MediaDeviceIds => {
                Section::Media
            }
            LocalStorage | SessionStorage | IndexedDb | StorageQuota => Section::Storage,
            DefaultBookmarks | BookmarkFolders => Section::Bookmarks,
            EnableExtensions | InstalledExtensions | PrivacyExtensions => Section::Extensions,
            EnablePlugins | AllowedPlugins | BlockUnlistedPlugins | PluginExecutionPolicy => {
                Section::Plugins
            }
        }
    }

    pub fn kind(&self) -> FieldKind {
        use FieldKey::*;
        match self {
            ProfileName | Description | ProxyServer | ProxyPort | ProxyUsername | ProxyPassword
            | CustomLat | CustomLng | CustomIp | VendorSpoofing | RendererSpoofing
            | DeviceCountSpoofing | MediaDeviceIds | StorageQuota => FieldKind::Text,

            EnableProxy | ProxyAuth | IpLeakProtection | DisableWebRtc | CanvasProtection
            | ClientRectsProtection | WebGlProtection | AudioProtection | AudioDeviceSpoofing
            | FontProtection | BlockUnlistedFonts | CameraAccess | MicrophoneAccess
            | LocalStorage | SessionStorage | IndexedDb | EnableExtensions | EnablePlugins
            | BlockUnlistedPlugins => FieldKind::Flag,

            Status | BrowserType | OperatingSystem | ScreenResolution | QuickLanguage
            | ProxyType | Timezone | Geolocation | Country | WebRtcMode | CanvasMode
            | PluginExecutionPolicy => FieldKind::Choice,

            CanvasSpoofingLevel | ImageHashNoiseLevel | AudioNoiseLevel => FieldKind::Level,

            AllowedFonts | DefaultBookmarks | BookmarkFolders | InstalledExtensions => {
                FieldKind::List
            }

            Languages | PrivacyExtensions | AllowedPlugins => FieldKind::Selection,
        }
    }

    /// All fields of one tab, in display order.
    pub fn in_section(section: Section) -> impl Iterator<Item = FieldKey> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |key| key.section() == section)
    }

    /// Values a select or checkbox field offers, in display order.
    ///
    /// Free-form fields (text, toggles, sliders, lists) return an empty list.
    /// Selection fields return their catalog; the stored set may still hold
    /// entries outside it.
    pub fn options(&self) -> Vec<&'static str> {
        fn values<T>(all: &'static [T], value: fn(&T) -> &'static str) -> Vec<&'static str> {
            all.iter().map(value).collect()
        }

        match self {
            FieldKey::Status => values(profile::ProfileStatus::ALL, profile::ProfileStatus::value),
            FieldKey::BrowserType => values(profile::BrowserType::ALL, profile::BrowserType::value),
            FieldKey::OperatingSystem => {
                values(profile::OperatingSystem::ALL, profile::OperatingSystem::value)
            }
            FieldKey::ScreenResolution => {
                let mut options =
                    values(profile::ResolutionPreset::ALL, profile::ResolutionPreset::value);
                options.push(profile::ScreenResolution::CUSTOM);
                options
            }
            FieldKey::QuickLanguage => values(profile::Language::ALL, profile::Language::value),
            FieldKey::ProxyType => values(profile::ProxyType::ALL, profile::ProxyType::value),
            FieldKey::Timezone => values(profile::Timezone::ALL, profile::Timezone::value),
            FieldKey::Geolocation => {
                values(profile::GeolocationMode::ALL, profile::GeolocationMode::value)
            }
            FieldKey::Country => values(profile::Country::ALL, profile::Country::value),
            FieldKey::WebRtcMode => values(profile::WebRtcMode::ALL, profile::WebRtcMode::value),
            FieldKey::CanvasMode => values(profile::CanvasMode::ALL, profile::CanvasMode::value),
            FieldKey::PluginExecutionPolicy => values(
                profile::PluginExecutionPolicy::ALL,
                profile::PluginExecutionPolicy::value,
            ),
            _ => SelectionField::from_key(*self)
                .map(|field| field.catalog().to_vec())
                .unwrap_or_default(),
        }
    }
}

/// Current value of a field, as read back from a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    /// Wire value of the selected option.
    Choice(String),
    Level(u8),
    List(Vec<String>),
    /// Members in sorted order.
    Selection(Vec<String>),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => write!(f, "{}", s),
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::Level(n) => write!(f, "{}", n),
            FieldValue::List(items) | FieldValue::Selection(items) => {
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl ProfileConfig {
    /// Reads the current value of a field.
    pub fn get(&self, key: FieldKey) -> FieldValue {
        use FieldValue::{Flag, Level, List};

        fn text(value: &str) -> FieldValue {
            FieldValue::Text(value.to_string())
        }

        fn choice<T: std::fmt::Display>(value: &T) -> FieldValue {
            FieldValue::Choice(value.to_string())
        }

        fn set(values: &BTreeSet<String>) -> FieldValue {
            FieldValue::Selection(values.iter().cloned().collect())
        }

        match key {
            FieldKey::ProfileName => text(&self.identity.profile_name),
            FieldKey::Description => text(&self.identity.description),
            FieldKey::Status => choice(&self.identity.status),
            FieldKey::BrowserType => choice(&self.identity.browser_type),
            FieldKey::OperatingSystem => choice(&self.identity.operating_system),
            FieldKey::ScreenResolution => choice(&self.identity.screen_resolution),
            FieldKey::QuickLanguage => choice(&self.identity.quick_language),

            FieldKey::EnableProxy => Flag(self.proxy.enabled),
            FieldKey::ProxyType => choice(&self.proxy.proxy_type),
            FieldKey::ProxyServer => text(&self.proxy.server),
            FieldKey::ProxyPort => text(&self.proxy.port),
            FieldKey::ProxyAuth => Flag(self.proxy.auth_enabled),
            FieldKey::ProxyUsername => text(&self.proxy.username),
            FieldKey::ProxyPassword => text(&self.proxy.password),

            FieldKey::Timezone => choice(&self.locale.timezone),
            FieldKey::Geolocation => choice(&self.locale.geolocation),
            FieldKey::CustomLat => text(&self.locale.custom_lat),
            FieldKey::CustomLng => text(&self.locale.custom_lng),
            FieldKey::Languages => set(&self.locale.languages),
            FieldKey::Country => choice(&self.locale.country),

            FieldKey::WebRtcMode => choice(&self.webrtc.mode),
            FieldKey::IpLeakProtection => Flag(self.webrtc.ip_leak_protection),
            FieldKey::CustomIp => text(&self.webrtc.custom_ip),
            FieldKey::DisableWebRtc => Flag(self.webrtc.disabled),

            FieldKey::CanvasProtection => Flag(self.canvas.protection),
            FieldKey::CanvasMode => choice(&self.canvas.mode),
            FieldKey::ClientRectsProtection => Flag(self.canvas.client_rects_protection),
            FieldKey::CanvasSpoofingLevel => Level(self.canvas.spoofing_level.get()),

            FieldKey::WebGlProtection => Flag(self.webgl.protection),
            FieldKey::VendorSpoofing => text(&self.webgl.vendor),
            FieldKey::RendererSpoofing => text(&self.webgl.renderer),
            FieldKey::ImageHashNoiseLevel => Level(self.webgl.image_hash_noise_level.get()),

            FieldKey::AudioProtection => Flag(self.audio.protection),
            FieldKey::AudioNoiseLevel => Level(self.audio.noise_level.get()),
            FieldKey::AudioDeviceSpoofing => Flag(self.audio.device_spoofing),

            FieldKey::FontProtection => Flag(self.fonts.protection),
            FieldKey::AllowedFonts => List(self.fonts.allowed.clone()),
            FieldKey::BlockUnlistedFonts => Flag(self.fonts.block_unlisted),

            FieldKey::CameraAccess => Flag(self.media.camera_access),
            FieldKey::MicrophoneAccess => Flag(self.media.microphone_access),
            FieldKey::DeviceCountSpoofing => text(&self.media.device_count),
            FieldKey::MediaDeviceIds => text(&self.media.device_ids),

            FieldKey::LocalStorage => Flag(self.storage.local_storage),
            FieldKey::SessionStorage => Flag(self.storage.session_storage),
            FieldKey::IndexedDb => Flag(self.storage.indexed_db),
            FieldKey::StorageQuota => text(&self.storage.quota_mb),

            FieldKey::DefaultBookmarks => List(self.bookmarks.defaults.clone()),
            FieldKey::BookmarkFolders => List(self.bookmarks.folders.clone()),

            FieldKey::EnableExtensions => Flag(self.extensions.enabled),
            FieldKey::InstalledExtensions => List(self.extensions.installed.clone()),
            FieldKey::PrivacyExtensions => set(&self.extensions.privacy),

            FieldKey::EnablePlugins => Flag(self.plugins.enabled),
            FieldKey::AllowedPlugins => set(&self.plugins.allowed),
            FieldKey::BlockUnlistedPlugins => Flag(self.plugins.block_unlisted),
            FieldKey::PluginExecutionPolicy => choice(&self.plugins.execution_policy),
        }
    }
}
