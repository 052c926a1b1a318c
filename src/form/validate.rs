//! Optional validation layered on top of the permissive update contract.
//!
//! Updates never fail; a host that wants to warn about half-filled or
//! malformed values calls [`validate`] (or [`ProfileConfig::validate`]) and
//! decides what to do with the issues. Hidden fields are not checked.

use thiserror::Error;

use super::edit::SelectionField;
use super::field::FieldKey;
use super::visibility::is_visible;
use crate::catalog;
use crate::profile::ProfileConfig;

/// A problem with one field's current value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("{0} is required")]
    Required(FieldKey),

    #[error("{field} must be a number, got: {value}")]
    NotANumber { field: FieldKey, value: String },

    #[error("{field} must be between {min} and {max}, got: {value}")]
    OutOfRange {
        field: FieldKey,
        value: String,
        min: f64,
        max: f64,
    },

    #[error("{field} must look like WIDTHxHEIGHT, got: {value}")]
    InvalidResolution { field: FieldKey, value: String },

    #[error("{field} contains an entry outside the catalog: {value}")]
    NotInCatalog { field: FieldKey, value: String },
}

impl ValidationIssue {
    pub fn field(&self) -> FieldKey {
        match self {
            ValidationIssue::Required(field) => *field,
            ValidationIssue::NotANumber { field, .. }
            | ValidationIssue::OutOfRange { field, .. }
            | ValidationIssue::InvalidResolution { field, .. }
            | ValidationIssue::NotInCatalog { field, .. } => *field,
        }
    }
}

/// Checks every visible field and returns the problems found.
pub fn validate(profile: &ProfileConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let visible = |key| is_visible(profile, key);

    if profile.identity.profile_name.trim().is_empty() {
        issues.push(ValidationIssue::Required(FieldKey::ProfileName));
    }

    let resolution = &profile.identity.screen_resolution;
    if resolution.dimensions().is_none() {
        issues.push(ValidationIssue::InvalidResolution {
            field: FieldKey::ScreenResolution,
            value: resolution.to_string(),
        });
    }

    if visible(FieldKey::ProxyServer) && profile.proxy.server.trim().is_empty() {
        issues.push(ValidationIssue::Required(FieldKey::ProxyServer));
    }
    if visible(FieldKey::ProxyPort) {
        check_number(
            &mut issues,
            FieldKey::ProxyPort,
            &profile.proxy.port,
            1.0,
            65535.0,
        );
    }
    if visible(FieldKey::ProxyUsername) && profile.proxy.username.trim().is_empty() {
        issues.push(ValidationIssue::Required(FieldKey::ProxyUsername));
    }

    if visible(FieldKey::CustomLat) {
        check_number(
            &mut issues,
            FieldKey::CustomLat,
            &profile.locale.custom_lat,
            -90.0,
            90.0,
        );
    }
    if visible(FieldKey::CustomLng) {
        check_number(
            &mut issues,
            FieldKey::CustomLng,
            &profile.locale.custom_lng,
            -180.0,
            180.0,
        );
    }

    if profile.locale.languages.is_empty() {
        issues.push(ValidationIssue::Required(FieldKey::Languages));
    }

    check_number(
        &mut issues,
        FieldKey::DeviceCountSpoofing,
        &profile.media.device_count,
        0.0,
        f64::from(u16::MAX),
    );
    check_number(
        &mut issues,
        FieldKey::StorageQuota,
        &profile.storage.quota_mb,
        0.0,
        f64::from(u32::MAX),
    );

    for field in [SelectionField::PrivacyExtensions, SelectionField::AllowedPlugins] {
        if visible(field.key()) {
            check_catalog(&mut issues, field, profile);
        }
    }

    issues
}

fn check_number(
    issues: &mut Vec<ValidationIssue>,
    field: FieldKey,
    value: &str,
    min: f64,
    max: f64,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(ValidationIssue::Required(field));
        return;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => {
            if number < min || number > max {
                issues.push(ValidationIssue::OutOfRange {
                    field,
                    value: value.to_string(),
                    min,
                    max,
                });
            }
        }
        _ => issues.push(ValidationIssue::NotANumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn check_catalog(
    issues: &mut Vec<ValidationIssue>,
    field: SelectionField,
    profile: &ProfileConfig,
) {
    let known = field.catalog();
    for value in field.members(profile) {
        if !catalog::contains(known, value) {
            issues.push(ValidationIssue::NotInCatalog {
                field: field.key(),
                value: value.clone(),
            });
        }
    }
}

impl ProfileConfig {
    /// See [`validate`].
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldUpdate;
    use crate::profile::{GeolocationMode, ScreenResolution};

    #[test]
    fn test_default_profile_is_valid() {
        assert!(validate(&ProfileConfig::default()).is_empty());
    }

    #[test]
    fn test_enabled_proxy_requires_server_and_port() {
        let profile = ProfileConfig::default().with(FieldUpdate::EnableProxy(true));
        let issues = validate(&profile);
        assert!(issues.contains(&ValidationIssue::Required(FieldKey::ProxyServer)));
        assert!(issues.contains(&ValidationIssue::Required(FieldKey::ProxyPort)));
    }

    #[test]
    fn test_proxy_port_range() {
        let profile = ProfileConfig::default()
            .with(FieldUpdate::EnableProxy(true))
            .with(FieldUpdate::ProxyServer("10.0.0.1".into()))
            .with(FieldUpdate::ProxyPort("70000".into()));
        let issues = validate(&profile);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field(), FieldKey::ProxyPort);
        assert!(matches!(issues[0], ValidationIssue::OutOfRange { .. }));

        let profile = profile.with(FieldUpdate::ProxyPort("eighty".into()));
        assert!(matches!(
            validate(&profile)[0],
            ValidationIssue::NotANumber { field: FieldKey::ProxyPort, .. }
        ));
    }

    #[test]
    fn test_hidden_fields_are_not_checked() {
        let profile = ProfileConfig::default()
            .with(FieldUpdate::ProxyPort("garbage".into()))
            .with(FieldUpdate::CustomLat("north".into()));
        assert!(validate(&profile).is_empty());
    }

    #[test]
    fn test_manual_geolocation_coordinates() {
        let profile = ProfileConfig::default()
            .with(FieldUpdate::Geolocation(GeolocationMode::Manual))
            .with(FieldUpdate::CustomLat("40.7128".into()))
            .with(FieldUpdate::CustomLng("-200".into()));
        let issues = validate(&profile);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field(), FieldKey::CustomLng);
    }

    #[test]
    fn test_empty_language_set_is_reported() {
        let profile = ProfileConfig::default().with(FieldUpdate::Languages(Default::default()));
        assert_eq!(
            validate(&profile),
            vec![ValidationIssue::Required(FieldKey::Languages)]
        );
    }

    #[test]
    fn test_custom_resolution_shape() {
        let profile = ProfileConfig::default()
            .with(FieldUpdate::ScreenResolution(ScreenResolution::Custom(String::new())));
        assert!(matches!(
            validate(&profile)[0],
            ValidationIssue::InvalidResolution { .. }
        ));
    }

    #[test]
    fn test_off_catalog_plugin_is_reported() {
        let profile = ProfileConfig::default().with(FieldUpdate::AllowedPlugins(
            ["PDF Viewer".to_string(), "ActiveX".to_string()].into_iter().collect(),
        ));
        assert_eq!(
            validate(&profile),
            vec![ValidationIssue::NotInCatalog {
                field: FieldKey::AllowedPlugins,
                value: "ActiveX".to_string(),
            }]
        );

        let profile = profile.with(FieldUpdate::EnablePlugins(false));
        assert!(validate(&profile).is_empty());
    }

    #[test]
    fn test_issue_messages() {
        let issue = ValidationIssue::Required(FieldKey::ProxyServer);
        assert_eq!(issue.to_string(), "proxyServer is required");
    }
}
