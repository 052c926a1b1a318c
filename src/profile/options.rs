//! Option enums for the select-style fields of a profile.
//!
//! Every enum carries its closed option set (`ALL`), the wire value used in
//! config files and string-keyed updates (`value()`), and the human-readable
//! label shown next to it (`label()`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string did not name any member of an option set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}. Valid values are: {expected}")]
pub struct UnknownOption {
    /// Name of the option set.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma separated list of accepted values.
    pub expected: String,
}

/// Declares a closed option set with wire values and labels.
///
/// Generates the enum, `ALL`, `value()`, `label()`, `Display`, a
/// case-insensitive `FromStr`, and optionally `Default`.
macro_rules! form_option {
    (
        $(#[$meta:meta])*
        pub enum $name:ident $(: default $default:ident)? {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($value:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value.
            pub fn value(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        $(
            impl Default for $name {
                fn default() -> Self {
                    $name::$default
                }
            }
        )?

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.value())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::profile::options::UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.value().eq_ignore_ascii_case(s))
                    .ok_or_else(|| $crate::profile::options::UnknownOption {
                        kind: stringify!($name),
                        value: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|option| option.value())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

pub(crate) use form_option;

form_option! {
    /// Whether the profile is in use.
    pub enum ProfileStatus: default Active {
        Active => ("active", "Active"),
        Inactive => ("inactive", "Inactive"),
    }
}

form_option! {
    /// Browser the profile presents itself as.
    pub enum BrowserType: default Chrome {
        Chrome => ("chrome", "Google Chrome"),
        Firefox => ("firefox", "Mozilla Firefox"),
        Safari => ("safari", "Safari"),
        Edge => ("edge", "Microsoft Edge"),
    }
}

form_option! {
    /// Operating system the profile presents itself as.
    pub enum OperatingSystem: default Windows {
        Windows => ("windows", "Windows"),
        MacOs => ("macos", "macOS"),
        Linux => ("linux", "Linux"),
    }
}

form_option! {
    /// Preset screen resolutions.
    pub enum ResolutionPreset: default Fhd {
        /// Full HD (most common)
        Fhd => ("1920x1080", "1920x1080"),
        /// Laptop HD
        LaptopHd => ("1366x768", "1366x768"),
        /// MacBook
        MacBook => ("1440x900", "1440x900"),
    }
}

form_option! {
    /// Primary browser language.
    pub enum Language: default EnUs {
        EnUs => ("en-US", "English (US)"),
        EnGb => ("en-GB", "English (UK)"),
        EsEs => ("es-ES", "Spanish"),
        FrFr => ("fr-FR", "French"),
        DeDe => ("de-DE", "German"),
    }
}

form_option! {
    /// Proxy protocol.
    pub enum ProxyType: default Http {
        Http => ("http", "HTTP"),
        Https => ("https", "HTTPS"),
        Socks4 => ("socks4", "SOCKS4"),
        Socks5 => ("socks5", "SOCKS5"),
    }
}

form_option! {
    /// Timezone reported by the profile.
    pub enum Timezone: default NewYork {
        NewYork => ("America/New_York", "Eastern Time (UTC-5)"),
        Chicago => ("America/Chicago", "Central Time (UTC-6)"),
        Denver => ("America/Denver", "Mountain Time (UTC-7)"),
        LosAngeles => ("America/Los_Angeles", "Pacific Time (UTC-8)"),
        London => ("Europe/London", "GMT (UTC+0)"),
        Paris => ("Europe/Paris", "CET (UTC+1)"),
    }
}

form_option! {
    /// How the geolocation API answers.
    pub enum GeolocationMode: default Auto {
        Auto => ("auto", "Auto-detect"),
        /// Coordinates come from `customLat`/`customLng`.
        Manual => ("manual", "Manual Input"),
        Disabled => ("disabled", "Disabled"),
    }
}

form_option! {
    pub enum Country: default Us {
        Us => ("US", "United States"),
        Ca => ("CA", "Canada"),
        Gb => ("GB", "United Kingdom"),
        De => ("DE", "Germany"),
        Fr => ("FR", "France"),
    }
}

form_option! {
    /// WebRTC handling mode.
    pub enum WebRtcMode: default Default {
        Default => ("default", "Default"),
        Block => ("block", "Block"),
        Proxy => ("proxy", "Proxy Only"),
    }
}

form_option! {
    /// What canvas reads return when protection is on.
    pub enum CanvasMode: default Noise {
        Block => ("block", "Block"),
        Noise => ("noise", "Add Noise"),
        Allow => ("allow", "Allow"),
    }
}

form_option! {
    pub enum PluginExecutionPolicy: default Ask {
        Allow => ("allow", "Allow All"),
        Ask => ("ask", "Ask Before Running"),
        Block => ("block", "Block All"),
    }
}

/// Screen resolution: one of the presets or a free-form `WIDTHxHEIGHT`.
///
/// Serialized as a plain string. `"custom"` with no dimensions yet is a
/// valid value (the user picked "Custom" but has not typed a size).
///
/// `Custom` never holds a preset size or the literal `"custom"`; build
/// values from text with [`ScreenResolution::custom`] or `FromStr`, which
/// normalize both. A hand-built `Custom` breaking this does not survive a
/// save and reload unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ScreenResolution {
    Preset(ResolutionPreset),
    Custom(String),
}

impl ScreenResolution {
    /// Wire value for the "Custom" select entry.
    pub const CUSTOM: &'static str = "custom";

    /// Resolution from typed text, normalized like `FromStr`.
    pub fn custom(raw: impl Into<String>) -> Self {
        Self::from(raw.into())
    }

    /// Parsed `(width, height)`, if the value has that shape.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let raw = match self {
            ScreenResolution::Preset(preset) => preset.value(),
            ScreenResolution::Custom(raw) => raw.as_str(),
        };
        let (w, h) = raw.trim().split_once(['x', 'X'])?;
        let width = w.trim().parse().ok().filter(|v: &u32| *v > 0)?;
        let height = h.trim().parse().ok().filter(|v: &u32| *v > 0)?;
        Some((width, height))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ScreenResolution::Custom(_))
    }
}

impl Default for ScreenResolution {
    fn default() -> Self {
        ScreenResolution::Preset(ResolutionPreset::default())
    }
}

impl fmt::Display for ScreenResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenResolution::Preset(preset) => f.write_str(preset.value()),
            ScreenResolution::Custom(raw) if raw.is_empty() => f.write_str(Self::CUSTOM),
            ScreenResolution::Custom(raw) => f.write_str(raw),
        }
    }
}

impl FromStr for ScreenResolution {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(preset) = s.parse::<ResolutionPreset>() {
            return Ok(ScreenResolution::Preset(preset));
        }
        if s.eq_ignore_ascii_case(Self::CUSTOM) {
            return Ok(ScreenResolution::Custom(String::new()));
        }
        Ok(ScreenResolution::Custom(s.to_string()))
    }
}

impl From<String> for ScreenResolution {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(resolution) => resolution,
            Err(never) => match never {},
        }
    }
}

impl From<ScreenResolution> for String {
    fn from(value: ScreenResolution) -> Self {
        value.to_string()
    }
}
