//! Fixed option catalogs offered by the form.
//!
//! These lists are static configuration. The form reads them to render
//! checkboxes and presets; it never mutates them.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::form::FieldUpdate;

/// Languages offered as "spoken language" checkboxes.
pub const LANGUAGES: &[&str] = &["en-US", "en-GB", "es-ES", "fr-FR", "de-DE", "it-IT"];

/// Known privacy extensions.
pub const PRIVACY_EXTENSIONS: &[&str] = &[
    "AdBlock",
    "Privacy Badger",
    "Ghostery",
    "uBlock Origin",
    "DuckDuckGo Privacy Essentials",
];

/// Known browser plugins.
pub const PLUGINS: &[&str] = &["PDF Viewer", "Flash Player", "Java", "Silverlight", "QuickTime"];

/// A GPU identity for the WebGL vendor/renderer spoof fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WebGlPreset {
    pub name: &'static str,
    pub vendor: &'static str,
    pub renderer: &'static str,
}

impl WebGlPreset {
    /// Updates that put this preset into the vendor/renderer fields.
    pub fn updates(&self) -> [FieldUpdate; 2] {
        [
            FieldUpdate::VendorSpoofing(self.vendor.to_string()),
            FieldUpdate::RendererSpoofing(self.renderer.to_string()),
        ]
    }
}

/// Common desktop GPUs.
pub const WEBGL_PRESETS: &[WebGlPreset] = &[
    WebGlPreset {
        name: "Intel UHD 620",
        vendor: "Intel Inc.",
        renderer: "Intel(R) UHD Graphics 620",
    },
    WebGlPreset {
        name: "Intel UHD 630",
        vendor: "Intel Inc.",
        renderer: "Intel(R) UHD Graphics 630",
    },
    WebGlPreset {
        name: "Intel Iris Xe",
        vendor: "Intel Inc.",
        renderer: "Intel(R) Iris(R) Xe Graphics",
    },
    WebGlPreset {
        name: "NVIDIA GTX 1660",
        vendor: "NVIDIA Corporation",
        renderer: "NVIDIA GeForce GTX 1660 SUPER/PCIe/SSE2",
    },
    WebGlPreset {
        name: "NVIDIA RTX 3060",
        vendor: "NVIDIA Corporation",
        renderer: "NVIDIA GeForce RTX 3060/PCIe/SSE2",
    },
    WebGlPreset {
        name: "AMD RX 6700 XT",
        vendor: "AMD",
        renderer: "AMD Radeon RX 6700 XT",
    },
    WebGlPreset {
        name: "Apple M1",
        vendor: "Apple Inc.",
        renderer: "Apple M1",
    },
];

/// Looks up a preset by name, ignoring case.
pub fn webgl_preset(name: &str) -> Option<&'static WebGlPreset> {
    WEBGL_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
}

/// Picks a preset at random.
pub fn random_webgl_preset<R: Rng + ?Sized>(rng: &mut R) -> &'static WebGlPreset {
    WEBGL_PRESETS.choose(rng).unwrap_or(&WEBGL_PRESETS[0])
}

/// Picks a preset deterministically from a seed, so the same profile name
/// always maps to the same GPU.
pub fn consistent_webgl_preset(seed: &str) -> &'static WebGlPreset {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let index = (hasher.finish() as usize) % WEBGL_PRESETS.len();
    &WEBGL_PRESETS[index]
}

/// Whether `value` is one of the catalog entries.
pub fn contains(catalog: &[&str], value: &str) -> bool {
    catalog.iter().any(|entry| *entry == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(PRIVACY_EXTENSIONS.len(), 5);
        assert_eq!(PLUGINS.len(), 5);
        assert!(contains(LANGUAGES, "fr-FR"));
        assert!(!contains(LANGUAGES, "en"));
    }

    #[test]
    fn test_default_webgl_strings_match_first_preset() {
        let profile = crate::profile::ProfileConfig::default();
        assert_eq!(WEBGL_PRESETS[0].vendor, profile.webgl.vendor);
        assert_eq!(WEBGL_PRESETS[0].renderer, profile.webgl.renderer);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(webgl_preset("apple m1").map(|p| p.vendor), Some("Apple Inc."));
        assert!(webgl_preset("Voodoo 3").is_none());
    }

    #[test]
    fn test_random_preset_comes_from_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let preset = random_webgl_preset(&mut rng);
            assert!(WEBGL_PRESETS.contains(preset));
        }
    }

    #[test]
    fn test_consistent_preset_is_deterministic() {
        assert_eq!(
            consistent_webgl_preset("Default Profile"),
            consistent_webgl_preset("Default Profile")
        );
    }

    #[test]
    fn test_preset_updates() {
        let preset = webgl_preset("AMD RX 6700 XT").unwrap();
        let [vendor, renderer] = preset.updates();
        assert_eq!(vendor, FieldUpdate::VendorSpoofing("AMD".to_string()));
        assert_eq!(
            renderer,
            FieldUpdate::RendererSpoofing("AMD Radeon RX 6700 XT".to_string())
        );
    }
}
