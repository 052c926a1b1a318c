//! Settings form state container.
//!
//! [`SettingsForm`] owns the profile being edited, the dirty flag, and the
//! active tab. Every edit goes through a typed [`FieldUpdate`]; the profile is
//! replaced with a new value per update and the form becomes dirty. `save`
//! and `cancel` only clear the flag and notify the host through a
//! [`FormListener`]. Nothing is persisted and cancel does not revert.
//!
//! # Modules
//!
//! - `field` - field keys, tabs, and reading values back
//! - `update` - the typed update union and string-keyed parsing
//! - `edit` - list append/remove and selection add/remove
//! - `visibility` - which fields are shown for a given profile
//! - `validate` - optional checks layered on top
//! - `listener` - save/cancel notifications
//!
//! # Example
//!
//! ```rust
//! use profile_form::form::{CountingListener, FieldUpdate, SettingsForm};
//!
//! let mut form = SettingsForm::new(CountingListener::default());
//! form.update(FieldUpdate::EnableProxy(true));
//! form.update(FieldUpdate::ProxyPort("8080".to_string()));
//! assert!(form.is_dirty());
//!
//! form.save();
//! assert!(!form.is_dirty());
//! assert_eq!(form.listener().saves, 1);
//! assert_eq!(form.profile().proxy.port, "8080");
//! ```

pub mod edit;
pub mod field;
pub mod listener;
pub mod update;
pub mod validate;
pub mod visibility;

pub use edit::{ListField, SelectionField};
pub use field::{FieldKey, FieldKind, FieldValue, Section};
pub use listener::{CallbackListener, CountingListener, FormListener, LoggingListener};
pub use update::{FieldUpdate, UpdateError};
pub use validate::ValidationIssue;

use tracing::{debug, info};

use crate::profile::ProfileConfig;

/// Editable browser profile with a dirty flag.
#[derive(Debug, Clone)]
pub struct SettingsForm<L: FormListener = ()> {
    profile: ProfileConfig,
    dirty: bool,
    active_section: Section,
    listener: L,
}

impl<L: FormListener> SettingsForm<L> {
    /// Mounts a form on the built-in default profile.
    pub fn new(listener: L) -> Self {
        Self::with_profile(ProfileConfig::default(), listener)
    }

    /// Mounts a form on an existing profile.
    pub fn with_profile(profile: ProfileConfig, listener: L) -> Self {
        Self {
            profile,
            dirty: false,
            active_section: Section::default(),
            listener,
        }
    }

    pub fn profile(&self) -> &ProfileConfig {
        &self.profile
    }

    /// True iff at least one field update happened since the last save or
    /// cancel.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the Save/Cancel bar is shown. Same as [`Self::is_dirty`].
    pub fn has_changes(&self) -> bool {
        self.dirty
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Unmounts the form, returning the last profile and the listener.
    pub fn into_parts(self) -> (ProfileConfig, L) {
        (self.profile, self.listener)
    }

    /// Replaces one field and marks the form dirty.
    pub fn update(&mut self, update: FieldUpdate) {
        let key = update.key();
        self.profile = self.profile.with(update);
        self.dirty = true;
        if key == FieldKey::ProxyPassword {
            debug!(field = %key, "Field updated");
        } else {
            debug!(field = %key, value = %self.profile.get(key), "Field updated");
        }
    }

    /// Applies several updates in order.
    pub fn update_all<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = FieldUpdate>,
    {
        for update in updates {
            self.update(update);
        }
    }

    /// String-keyed update for hosts with untyped input.
    ///
    /// On error the form is left untouched.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), UpdateError> {
        let update = FieldUpdate::parse_named(name, raw)?;
        self.update(update);
        Ok(())
    }

    /// Appends an entry to a list field.
    ///
    /// Returns `false`, leaving the form untouched, for blank input.
    pub fn append(&mut self, field: ListField, entry: &str) -> bool {
        match field.append(&self.profile, entry) {
            Some(update) => {
                self.update(update);
                true
            }
            None => {
                debug!(field = %field, "Ignoring blank list entry");
                false
            }
        }
    }

    /// Removes the entry at `index` from a list field.
    ///
    /// Returns `false`, leaving the form untouched, when out of range.
    pub fn remove_at(&mut self, field: ListField, index: usize) -> bool {
        match field.remove_at(&self.profile, index) {
            Some(update) => {
                self.update(update);
                true
            }
            None => {
                debug!(field = %field, index, "Ignoring out-of-range removal");
                false
            }
        }
    }

    /// Checks `value` in a selection field.
    ///
    /// Returns `false`, leaving the form untouched, if it was already checked.
    pub fn select(&mut self, field: SelectionField, value: &str) -> bool {
        match field.add(&self.profile, value) {
            Some(update) => {
                self.update(update);
                true
            }
            None => {
                debug!(field = %field, value, "Selection unchanged");
                false
            }
        }
    }

    /// Unchecks `value` in a selection field.
    ///
    /// Returns `false`, leaving the form untouched, if it was not checked or
    /// is the last spoken language.
    pub fn deselect(&mut self, field: SelectionField, value: &str) -> bool {
        match field.remove(&self.profile, value) {
            Some(update) => {
                self.update(update);
                true
            }
            None => {
                debug!(field = %field, value, "Selection unchanged");
                false
            }
        }
    }

    /// Clears the dirty flag and notifies the host.
    pub fn save(&mut self) {
        self.dirty = false;
        info!(profile = %self.profile.identity.profile_name, "Profile saved");
        self.listener.on_save();
    }

    /// Clears the dirty flag and notifies the host. Edits are kept.
    pub fn cancel(&mut self) {
        self.dirty = false;
        info!(profile = %self.profile.identity.profile_name, "Profile edit cancelled");
        self.listener.on_cancel();
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    /// Switches tabs. Does not affect the dirty flag.
    pub fn select_section(&mut self, section: Section) {
        self.active_section = section;
    }

    pub fn is_visible(&self, key: FieldKey) -> bool {
        visibility::is_visible(&self.profile, key)
    }

    /// Fields currently shown on the active tab.
    pub fn visible_fields(&self) -> Vec<FieldKey> {
        visibility::visible_fields(&self.profile, self.active_section)
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate::validate(&self.profile)
    }
}

impl Default for SettingsForm<()> {
    fn default() -> Self {
        Self::new(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_is_clean() {
        let form: SettingsForm = SettingsForm::default();
        assert!(!form.is_dirty());
        assert!(!form.has_changes());
        assert_eq!(form.active_section(), Section::Overview);
        assert_eq!(form.profile(), &ProfileConfig::default());
    }

    #[test]
    fn test_update_marks_dirty() {
        let mut form: SettingsForm = SettingsForm::default();
        form.update(FieldUpdate::Description("Testing".to_string()));
        assert!(form.is_dirty());
        assert_eq!(form.profile().identity.description, "Testing");
    }

    #[test]
    fn test_noop_edits_keep_form_clean() {
        let mut form: SettingsForm = SettingsForm::default();
        assert!(!form.append(ListField::AllowedFonts, "  "));
        assert!(!form.remove_at(ListField::BookmarkFolders, 10));
        assert!(!form.select(SelectionField::Languages, "en"));
        assert!(!form.deselect(SelectionField::PrivacyExtensions, "Ghostery"));
        assert!(!form.is_dirty());
        assert_eq!(form.profile(), &ProfileConfig::default());
    }

    #[test]
    fn test_set_rejects_bad_input_without_side_effects() {
        let mut form: SettingsForm = SettingsForm::default();
        assert!(form.set("canvasMode", "sparkle").is_err());
        assert!(form.set("nope", "1").is_err());
        assert!(!form.is_dirty());

        form.set("canvasMode", "block").unwrap();
        assert!(form.is_dirty());
    }

    #[test]
    fn test_switching_tabs_is_not_an_edit() {
        let mut form: SettingsForm = SettingsForm::default();
        form.select_section(Section::Proxy);
        assert_eq!(form.active_section(), Section::Proxy);
        assert!(!form.is_dirty());
        assert_eq!(form.visible_fields(), vec![FieldKey::EnableProxy]);
    }

    #[test]
    fn test_save_and_cancel_notify_once() {
        let mut form = SettingsForm::new(CountingListener::default());
        form.save();
        form.cancel();
        form.cancel();
        assert_eq!(form.listener(), &CountingListener { saves: 1, cancels: 2 });
    }

    #[test]
    fn test_into_parts_returns_last_profile() {
        let mut form: SettingsForm = SettingsForm::default();
        form.update(FieldUpdate::ProfileName("Shopping".to_string()));
        let (profile, ()) = form.into_parts();
        assert_eq!(profile.identity.profile_name, "Shopping");
    }
}
