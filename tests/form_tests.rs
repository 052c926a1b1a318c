//! Integration tests for the settings form
//!
//! Tests that single-field updates leave the rest of the profile alone,
//! save/cancel notify exactly once and keep edits, list and selection
//! editing no-ops, and visibility driven by toggles.

use std::cell::Cell;
use std::collections::BTreeSet;

use profile_form::form::{
    CallbackListener, CountingListener, FieldKey, FieldUpdate, FieldValue, ListField, Section,
    SelectionField, SettingsForm,
};
use profile_form::profile::{CanvasMode, ProfileConfig, SpoofLevel};

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn counting_form() -> SettingsForm<CountingListener> {
    SettingsForm::new(CountingListener::default())
}

/// Every key except `changed` reads the same in both profiles.
fn assert_only_changed(before: &ProfileConfig, after: &ProfileConfig, changed: FieldKey) {
    for key in FieldKey::ALL {
        if *key != changed {
            assert_eq!(before.get(*key), after.get(*key), "{} changed unexpectedly", key);
        }
    }
}

/// Raw input for `key` that differs from what `profile` holds, and how it
/// reads back once applied.
fn edited_value(profile: &ProfileConfig, key: FieldKey) -> (String, FieldValue) {
    match profile.get(key) {
        FieldValue::Text(current) => {
            let raw = format!("{}-edited", current);
            (raw.clone(), FieldValue::Text(raw))
        }
        FieldValue::Flag(current) => ((!current).to_string(), FieldValue::Flag(!current)),
        FieldValue::Level(current) => {
            let next = if current < 5 { current + 1 } else { current - 1 };
            (next.to_string(), FieldValue::Level(next))
        }
        FieldValue::Choice(current) => {
            let option = key
                .options()
                .into_iter()
                .find(|option| *option != current)
                .unwrap();
            (option.to_string(), FieldValue::Choice(option.to_string()))
        }
        FieldValue::List(_) => (
            "alpha, beta".to_string(),
            FieldValue::List(vec!["alpha".to_string(), "beta".to_string()]),
        ),
        FieldValue::Selection(_) => (
            "de-DE, Ghostery".to_string(),
            FieldValue::Selection(vec!["Ghostery".to_string(), "de-DE".to_string()]),
        ),
    }
}

#[test]
fn test_every_field_update_reads_back_and_touches_nothing_else() {
    for key in FieldKey::ALL {
        let mut form = counting_form();
        let before = form.profile().clone();
        let (raw, expected) = edited_value(&before, *key);
        assert_ne!(before.get(*key), expected, "{} sample equals the default", key);

        form.set(key.value(), &raw)
            .unwrap_or_else(|err| panic!("{} rejected {:?}: {}", key, raw, err));

        assert_eq!(form.profile().get(*key), expected, "{} did not read back", key);
        assert!(form.is_dirty(), "{} left the form clean", key);
        assert_only_changed(&before, form.profile(), *key);
    }
}

#[test]
fn test_update_changes_exactly_one_field() {
    let mut form = counting_form();
    let before = form.profile().clone();

    form.update(FieldUpdate::ProxyServer("proxy.example.com".to_string()));

    assert_eq!(
        form.profile().get(FieldKey::ProxyServer),
        FieldValue::Text("proxy.example.com".to_string())
    );
    assert_only_changed(&before, form.profile(), FieldKey::ProxyServer);
    assert!(form.is_dirty());
}

#[test]
fn test_every_string_field_round_trips_through_set() {
    let mut form = counting_form();
    let samples = [
        ("profileName", "Work"),
        ("description", "Shopping only"),
        ("proxyServer", "10.0.0.2"),
        ("proxyPort", "3128"),
        ("proxyUsername", "alice"),
        ("proxyPassword", "s3cret"),
        ("customLat", "51.5"),
        ("customLng", "-0.12"),
        ("customIP", "203.0.113.7"),
        ("vendorSpoofing", "AMD"),
        ("rendererSpoofing", "AMD Radeon RX 6700 XT"),
        ("deviceCountSpoofing", "4"),
        ("mediaDeviceIds", "cam-1,mic-1"),
        ("storageQuota", "100"),
    ];

    for (name, value) in samples {
        let key: FieldKey = name.parse().unwrap();
        let before = form.profile().clone();
        form.set(name, value).unwrap();
        assert_eq!(form.profile().get(key), FieldValue::Text(value.to_string()));
        assert_only_changed(&before, form.profile(), key);
    }
}

#[test]
fn test_save_notifies_once_and_keeps_edits() {
    let mut form = counting_form();
    form.update(FieldUpdate::EnableProxy(true));
    form.update(FieldUpdate::ProxyPort("8080".to_string()));
    assert!(form.has_changes());

    form.save();

    assert!(!form.has_changes());
    assert_eq!(form.listener().saves, 1);
    assert_eq!(form.listener().cancels, 0);
    assert!(form.profile().proxy.enabled);
    assert_eq!(form.profile().proxy.port, "8080");
}

#[test]
fn test_cancel_notifies_once_and_does_not_revert() {
    let mut form = counting_form();
    form.update(FieldUpdate::CanvasMode(CanvasMode::Block));

    form.cancel();

    assert!(!form.is_dirty());
    assert_eq!(form.listener().cancels, 1);
    assert_eq!(form.listener().saves, 0);
    assert_eq!(form.profile().canvas.mode, CanvasMode::Block);
}

#[test]
fn test_save_without_changes_still_notifies() {
    let saves = Cell::new(0);
    let mut form = SettingsForm::new(CallbackListener::new(|| saves.set(saves.get() + 1), || {}));

    form.save();
    form.save();

    assert!(!form.is_dirty());
    drop(form);
    assert_eq!(saves.get(), 2);
}

#[test]
fn test_canvas_toggle_preserves_hidden_values() {
    let mut form = counting_form();
    form.update(FieldUpdate::CanvasMode(CanvasMode::Allow));
    form.update(FieldUpdate::CanvasSpoofingLevel(SpoofLevel::new(5)));

    form.update(FieldUpdate::CanvasProtection(false));
    assert!(!form.is_visible(FieldKey::CanvasMode));
    assert!(!form.is_visible(FieldKey::CanvasSpoofingLevel));

    form.update(FieldUpdate::CanvasProtection(true));
    assert!(form.is_visible(FieldKey::CanvasMode));
    assert_eq!(form.profile().canvas.mode, CanvasMode::Allow);
    assert_eq!(form.profile().canvas.spoofing_level.get(), 5);
}

#[test]
fn test_blank_append_is_ignored() {
    let mut form = counting_form();
    let before = form.profile().clone();

    assert!(!form.append(ListField::AllowedFonts, ""));
    assert!(!form.append(ListField::AllowedFonts, "   "));

    assert_eq!(form.profile(), &before);
    assert!(!form.is_dirty());
}

#[test]
fn test_append_adds_to_end() {
    let mut form = counting_form();
    assert!(form.append(ListField::BookmarkFolders, "Travel"));
    assert_eq!(
        form.profile().bookmarks.folders,
        vec!["Work", "Personal", "Development", "Travel"]
    );
    assert!(form.is_dirty());
}

#[test]
fn test_remove_at_bounds() {
    let mut form = counting_form();
    let len = form.profile().extensions.installed.len();

    assert!(!form.remove_at(ListField::InstalledExtensions, len));
    assert!(!form.is_dirty());

    assert!(form.remove_at(ListField::InstalledExtensions, 0));
    assert_eq!(form.profile().extensions.installed, vec!["LastPass"]);
}

#[test]
fn test_selection_add_is_idempotent() {
    let mut form = counting_form();

    assert!(form.select(SelectionField::Languages, "fr-FR"));
    assert_eq!(form.profile().locale.languages, set(&["en-US", "en", "fr-FR"]));

    assert!(!form.select(SelectionField::Languages, "fr-FR"));
    assert_eq!(form.profile().locale.languages.len(), 3);
}

#[test]
fn test_selection_remove_absent_is_noop() {
    let mut form = counting_form();
    let before = form.profile().clone();

    assert!(!form.deselect(SelectionField::AllowedPlugins, "Java"));
    assert_eq!(form.profile(), &before);
    assert!(!form.is_dirty());

    assert!(form.deselect(SelectionField::AllowedPlugins, "Flash Player"));
    assert_eq!(form.profile().plugins.allowed, set(&["PDF Viewer"]));
}

#[test]
fn test_languages_cannot_be_emptied_through_set() {
    let mut form = counting_form();

    assert!(form.set("languages", "").is_err());
    assert!(form.set("languages", " , ").is_err());

    assert!(!form.is_dirty());
    assert_eq!(form.profile().locale.languages, set(&["en-US", "en"]));
}

#[test]
fn test_last_language_cannot_be_removed() {
    let mut form = counting_form();
    assert!(form.deselect(SelectionField::Languages, "en"));
    assert!(!form.deselect(SelectionField::Languages, "en-US"));
    assert_eq!(form.profile().locale.languages, set(&["en-US"]));
}

#[test]
fn test_proxy_scenario() {
    let mut form = counting_form();
    form.select_section(Section::Proxy);
    assert_eq!(form.visible_fields(), vec![FieldKey::EnableProxy]);

    form.set("enableProxy", "true").unwrap();
    form.set("proxyPort", "8080").unwrap();
    assert!(form.visible_fields().contains(&FieldKey::ProxyServer));
    assert!(!form.visible_fields().contains(&FieldKey::ProxyUsername));

    form.set("proxyAuth", "yes").unwrap();
    assert!(form.visible_fields().contains(&FieldKey::ProxyUsername));

    form.save();
    assert!(!form.has_changes());
    assert_eq!(form.listener().saves, 1);
    assert_eq!(form.profile().proxy.port, "8080");
}

#[test]
fn test_validation_is_advisory() {
    let mut form = counting_form();
    form.update(FieldUpdate::EnableProxy(true));

    assert!(!form.validate().is_empty());

    form.save();
    assert_eq!(form.listener().saves, 1);
    assert!(form.profile().proxy.enabled);
}

#[test]
fn test_webgl_preset_applies_as_updates() {
    let mut form = counting_form();
    let preset = profile_form::catalog::webgl_preset("Apple M1").unwrap();

    form.update_all(preset.updates());

    assert_eq!(form.profile().webgl.vendor, "Apple Inc.");
    assert_eq!(form.profile().webgl.renderer, "Apple M1");
    assert!(form.is_dirty());
}
