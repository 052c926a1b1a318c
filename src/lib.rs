//! # Profile Form
//!
//! State container for an anti-detect browser profile settings form.
//!
//! The crate models the full profile record a user edits on a tabbed
//! settings screen, applies field edits as typed updates, tracks whether
//! there are unsaved changes, and tells the host when the user saves or
//! cancels. It does not launch or configure a browser.
//!
//! ## Features
//!
//! - **Typed Profile Model**: One sub-record per tab, closed option sets as enums
//! - **Typed Updates**: A single update union covering every editable field
//! - **List and Selection Editing**: Append/remove and checkbox add/remove helpers
//! - **Conditional Visibility**: Which fields a host should show for a profile
//! - **Optional Validation**: Warnings for half-filled or malformed values
//! - **Flexible Configuration**: TOML/JSON files, environment variables, CLI arguments
//!
//! ## Quick Start
//!
//! ```rust
//! use profile_form::{
//!     form::{CountingListener, FieldUpdate, SelectionField, SettingsForm},
//!     profile::CanvasMode,
//! };
//!
//! let mut form = SettingsForm::new(CountingListener::default());
//!
//! form.update(FieldUpdate::CanvasMode(CanvasMode::Block));
//! form.select(SelectionField::Languages, "fr-FR");
//! assert!(form.has_changes());
//!
//! form.save();
//! assert!(!form.has_changes());
//! assert_eq!(form.listener().saves, 1);
//! ```
//!
//! ## Module Overview
//!
//! - [`profile`]: The profile record, its sections, and option enums
//! - [`form`]: The form state container, updates, editing helpers, visibility
//! - [`catalog`]: Fixed option catalogs and WebGL presets
//! - [`config`]: Host configuration loading and management
//!
//! ## Configuration
//!
//! Host configuration follows a precedence chain:
//! 1. Default values
//! 2. Configuration file (TOML/JSON)
//! 3. Environment variables (`PROFILE_FORM_*`)
//! 4. CLI arguments
//!
//! See [`config::FormSettings`] for all available options.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Full version string with name
pub const FULL_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Module Exports
// ============================================================================

/// Fixed option catalogs: languages, privacy extensions, plugins, GPUs.
pub mod catalog;

/// Configuration management for loading settings from files, env, and CLI.
pub mod config;

/// The settings form state container.
pub mod form;

/// Browser profile data model.
pub mod profile;

// ============================================================================
// Re-exports for Convenience
// ============================================================================

// Profile types
pub use profile::{ProfileConfig, ScreenResolution, UnknownOption};

// Form types
pub use form::{
    FieldKey, FieldUpdate, FieldValue, FormListener, ListField, Section, SelectionField,
    SettingsForm, UpdateError, ValidationIssue,
};

// Config types
pub use config::{CliArgs, ConfigError, FormSettings, OutputFormat};

// ============================================================================
// Prelude Module
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust
/// use profile_form::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{CliArgs, FormSettings};
    pub use crate::form::{
        FieldKey, FieldUpdate, FormListener, ListField, Section, SelectionField, SettingsForm,
    };
    pub use crate::profile::ProfileConfig;
    pub use crate::{FULL_VERSION, NAME, VERSION};
}
