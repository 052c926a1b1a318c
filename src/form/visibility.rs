//! Conditional visibility of fields.
//!
//! Visibility is a pure function of the current profile. Hidden fields keep
//! their stored values, so switching a governing toggle back on brings the
//! previous values back into view.

use super::field::{FieldKey, Section};
use crate::profile::{GeolocationMode, ProfileConfig};

/// Whether `key` is shown for the given profile.
pub fn is_visible(profile: &ProfileConfig, key: FieldKey) -> bool {
    use FieldKey::*;
    match key {
        ProxyType | ProxyServer | ProxyPort | ProxyAuth => profile.proxy.enabled,
        ProxyUsername | ProxyPassword => profile.proxy.enabled && profile.proxy.auth_enabled,

        CustomLat | CustomLng => profile.locale.geolocation == GeolocationMode::Manual,

        CanvasMode | ClientRectsProtection | CanvasSpoofingLevel => profile.canvas.protection,

        VendorSpoofing | RendererSpoofing | ImageHashNoiseLevel => profile.webgl.protection,

        AudioNoiseLevel | AudioDeviceSpoofing => profile.audio.protection,

        AllowedFonts | BlockUnlistedFonts => profile.fonts.protection,

        InstalledExtensions | PrivacyExtensions => profile.extensions.enabled,

        AllowedPlugins | BlockUnlistedPlugins | PluginExecutionPolicy => profile.plugins.enabled,

        _ => true,
    }
}

/// Fields of `section` that are currently shown, in display order.
pub fn visible_fields(profile: &ProfileConfig, section: Section) -> Vec<FieldKey> {
    FieldKey::in_section(section)
        .filter(|key| is_visible(profile, *key))
        .collect()
}

/// The toggle a field depends on, if any.
///
/// For the proxy credentials this is the innermost toggle (`proxyAuth`),
/// which is itself gated by `enableProxy`.
pub fn governing_flag(key: FieldKey) -> Option<FieldKey> {
    use FieldKey::*;
    match key {
        ProxyType | ProxyServer | ProxyPort | ProxyAuth => Some(EnableProxy),
        ProxyUsername | ProxyPassword => Some(ProxyAuth),
        CustomLat | CustomLng => Some(Geolocation),
        CanvasMode | ClientRectsProtection | CanvasSpoofingLevel => Some(CanvasProtection),
        VendorSpoofing | RendererSpoofing | ImageHashNoiseLevel => Some(WebGlProtection),
        AudioNoiseLevel | AudioDeviceSpoofing => Some(AudioProtection),
        AllowedFonts | BlockUnlistedFonts => Some(FontProtection),
        InstalledExtensions | PrivacyExtensions => Some(EnableExtensions),
        AllowedPlugins | BlockUnlistedPlugins | PluginExecutionPolicy => Some(EnablePlugins),
        _ => None,
    }
}
