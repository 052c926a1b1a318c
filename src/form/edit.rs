//! List and selection editing.
//!
//! List fields are ordered sequences edited with append/remove-at.
//! Selection fields are membership sets fed from a fixed catalog and edited
//! with add/remove. Every edit here is computed against the current value
//! and either produces a full replacement [`FieldUpdate`] or `None` when the
//! edit would change nothing.

use std::collections::BTreeSet;

use super::field::FieldKey;
use super::update::FieldUpdate;
use crate::catalog;
use crate::profile::ProfileConfig;

/// Ordered, user-editable string lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    AllowedFonts,
    DefaultBookmarks,
    BookmarkFolders,
    InstalledExtensions,
}

impl ListField {
    pub const ALL: [ListField; 4] = [
        ListField::AllowedFonts,
        ListField::DefaultBookmarks,
        ListField::BookmarkFolders,
        ListField::InstalledExtensions,
    ];

    pub fn key(&self) -> FieldKey {
        match self {
            ListField::AllowedFonts => FieldKey::AllowedFonts,
            ListField::DefaultBookmarks => FieldKey::DefaultBookmarks,
            ListField::BookmarkFolders => FieldKey::BookmarkFolders,
            ListField::InstalledExtensions => FieldKey::InstalledExtensions,
        }
    }

    pub fn from_key(key: FieldKey) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Current entries of this list in `profile`.
    pub fn items<'a>(&self, profile: &'a ProfileConfig) -> &'a [String] {
        match self {
            ListField::AllowedFonts => &profile.fonts.allowed,
            ListField::DefaultBookmarks => &profile.bookmarks.defaults,
            ListField::BookmarkFolders => &profile.bookmarks.folders,
            ListField::InstalledExtensions => &profile.extensions.installed,
        }
    }

    /// Update replacing the whole list.
    pub fn replace(&self, items: Vec<String>) -> FieldUpdate {
        match self {
            ListField::AllowedFonts => FieldUpdate::AllowedFonts(items),
            ListField::DefaultBookmarks => FieldUpdate::DefaultBookmarks(items),
            ListField::BookmarkFolders => FieldUpdate::BookmarkFolders(items),
            ListField::InstalledExtensions => FieldUpdate::InstalledExtensions(items),
        }
    }

    /// Appends `entry`. `None` when the entry is empty or whitespace only.
    pub fn append(&self, profile: &ProfileConfig, entry: &str) -> Option<FieldUpdate> {
        append(self.items(profile), entry).map(|items| self.replace(items))
    }

    /// Removes the entry at `index`. `None` when the index is out of range.
    pub fn remove_at(&self, profile: &ProfileConfig, index: usize) -> Option<FieldUpdate> {
        remove_at(self.items(profile), index).map(|items| self.replace(items))
    }
}

impl std::fmt::Display for ListField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Checkbox-style multi-selects backed by a fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionField {
    Languages,
    PrivacyExtensions,
    AllowedPlugins,
}

impl SelectionField {
    pub const ALL: [SelectionField; 3] = [
        SelectionField::Languages,
        SelectionField::PrivacyExtensions,
        SelectionField::AllowedPlugins,
    ];

    pub fn key(&self) -> FieldKey {
        match self {
            SelectionField::Languages => FieldKey::Languages,
            SelectionField::PrivacyExtensions => FieldKey::PrivacyExtensions,
            SelectionField::AllowedPlugins => FieldKey::AllowedPlugins,
        }
    }

    pub fn from_key(key: FieldKey) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Options the form offers for this selection.
    pub fn catalog(&self) -> &'static [&'static str] {
        match self {
            SelectionField::Languages => catalog::LANGUAGES,
            SelectionField::PrivacyExtensions => catalog::PRIVACY_EXTENSIONS,
            SelectionField::AllowedPlugins => catalog::PLUGINS,
        }
    }

    pub fn members<'a>(&self, profile: &'a ProfileConfig) -> &'a BTreeSet<String> {
        match self {
            SelectionField::Languages => &profile.locale.languages,
            SelectionField::PrivacyExtensions => &profile.extensions.privacy,
            SelectionField::AllowedPlugins => &profile.plugins.allowed,
        }
    }

    /// Update replacing the whole selection.
    pub fn replace(&self, members: BTreeSet<String>) -> FieldUpdate {
        match self {
            SelectionField::Languages => FieldUpdate::Languages(members),
            SelectionField::PrivacyExtensions => FieldUpdate::PrivacyExtensions(members),
            SelectionField::AllowedPlugins => FieldUpdate::AllowedPlugins(members),
        }
    }

    /// Adds `value`. `None` when it is already selected or blank.
    pub fn add(&self, profile: &ProfileConfig, value: &str) -> Option<FieldUpdate> {
        add_member(self.members(profile), value).map(|members| self.replace(members))
    }

    /// Removes `value`. `None` when it is not selected, or when removing it
    /// would leave the language set empty.
    pub fn remove(&self, profile: &ProfileConfig, value: &str) -> Option<FieldUpdate> {
        let current = self.members(profile);
        if *self == SelectionField::Languages && current.len() == 1 && current.contains(value) {
            return None;
        }
        remove_member(current, value).map(|members| self.replace(members))
    }
}

impl std::fmt::Display for SelectionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// `items` with `entry` appended, or `None` for blank input.
pub fn append(items: &[String], entry: &str) -> Option<Vec<String>> {
    if entry.trim().is_empty() {
        return None;
    }
    let mut next = items.to_vec();
    next.push(entry.to_string());
    Some(next)
}

/// `items` without the entry at `index`, or `None` when out of range.
pub fn remove_at(items: &[String], index: usize) -> Option<Vec<String>> {
    if index >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    next.remove(index);
    Some(next)
}

/// `members` plus `value`, or `None` if already present or blank.
pub fn add_member(members: &BTreeSet<String>, value: &str) -> Option<BTreeSet<String>> {
    if value.trim().is_empty() || members.contains(value) {
        return None;
    }
    let mut next = members.clone();
    next.insert(value.to_string());
    Some(next)
}

/// `members` minus `value`, or `None` if absent.
pub fn remove_member(members: &BTreeSet<String>, value: &str) -> Option<BTreeSet<String>> {
    if !members.contains(value) {
        return None;
    }
    let mut next = members.clone();
    next.remove(value);
    Some(next)
}
