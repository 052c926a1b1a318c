//! Host settings and configuration management.
//!
//! This module provides the options of the `profile-form` host, supporting
//! multiple configuration sources with proper precedence.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::form::Section;

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML configuration: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Failed to serialize TOML configuration.
    #[error("Failed to serialize TOML configuration: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// Failed to parse JSON configuration.
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Unsupported file format.
    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

/// Text format used for configuration files and for printing profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Toml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Json
    }
}

impl OutputFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        extension
            .parse()
            .map_err(|_| ConfigError::UnsupportedFormat(extension))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Toml => write!(f, "toml"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "toml" => Ok(OutputFormat::Toml),
            _ => Err(ConfigError::ValidationError(format!(
                "Unknown output format: {}. Valid formats are: json, toml",
                s
            ))),
        }
    }
}

/// Settings of the host that mounts the profile form.
///
/// # Configuration Precedence
///
/// Settings are applied in the following order (later sources override earlier):
/// 1. Default values
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables
/// 4. CLI arguments
///
/// # Example
///
/// ```rust
/// use profile_form::config::{FormSettings, OutputFormat};
///
/// let settings = FormSettings::default().with_output_format(OutputFormat::Toml);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSettings {
    /// Profile file loaded at mount instead of the built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_profile: Option<PathBuf>,

    /// Format used when printing the profile.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Tab that is active when the form mounts.
    #[serde(default = "default_start_section")]
    pub start_section: Section,

    /// Message logged when the form is saved.
    #[serde(default = "default_save_message")]
    pub save_message: String,

    /// Message logged when the form is cancelled.
    #[serde(default = "default_cancel_message")]
    pub cancel_message: String,
}

// Default value functions for serde
fn default_start_section() -> Section {
    Section::Overview
}

fn default_save_message() -> String {
    "Profile settings saved successfully!".to_string()
}

fn default_cancel_message() -> String {
    "Changes discarded".to_string()
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            initial_profile: None,
            output_format: OutputFormat::default(),
            start_section: default_start_section(),
            save_message: default_save_message(),
            cancel_message: default_cancel_message(),
        }
    }
}

impl FormSettings {
    /// Loads settings from a configuration file.
    ///
    /// Supports both TOML and JSON formats, detected by file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match OutputFormat::from_path(path)? {
            OutputFormat::Toml => Ok(toml::from_str(&content)?),
            OutputFormat::Json => Ok(serde_json::from_str(&content)?),
        }
    }

    /// Saves settings to a configuration file.
    ///
    /// The format is determined by the file extension.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match OutputFormat::from_path(path)? {
            OutputFormat::Toml => toml::to_string_pretty(self)?,
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
        };

        fs::write(path, content)?;
        Ok(())
    }

    /// Applies environment variable overrides to current settings.
    ///
    /// Environment variables are prefixed with `PROFILE_FORM_`:
    /// - `PROFILE_FORM_INITIAL_PROFILE`
    /// - `PROFILE_FORM_OUTPUT_FORMAT`
    /// - `PROFILE_FORM_START_SECTION`
    /// - `PROFILE_FORM_SAVE_MESSAGE`
    /// - `PROFILE_FORM_CANCEL_MESSAGE`
    ///
    /// Unparseable values are ignored.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("PROFILE_FORM_INITIAL_PROFILE") {
            self.initial_profile = Some(PathBuf::from(val));
        }

        if let Ok(val) = env::var("PROFILE_FORM_OUTPUT_FORMAT") {
            if let Ok(format) = val.parse() {
                self.output_format = format;
            }
        }

        if let Ok(val) = env::var("PROFILE_FORM_START_SECTION") {
            if let Ok(section) = val.parse() {
                self.start_section = section;
            }
        }

        if let Ok(val) = env::var("PROFILE_FORM_SAVE_MESSAGE") {
            self.save_message = val;
        }

        if let Ok(val) = env::var("PROFILE_FORM_CANCEL_MESSAGE") {
            self.cancel_message = val;
        }
    }

    /// Merges current settings with environment variable overrides.
    pub fn merge_with_env(mut self) -> Self {
        self.apply_env_overrides();
        self
    }

    /// Merges settings with CLI arguments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use profile_form::config::{CliArgs, FormSettings, OutputFormat};
    ///
    /// let args = CliArgs {
    ///     output_format: Some(OutputFormat::Toml),
    ///     ..Default::default()
    /// };
    ///
    /// let settings = FormSettings::default().merge_with_args(&args);
    /// assert_eq!(settings.output_format, OutputFormat::Toml);
    /// ```
    pub fn merge_with_args(mut self, args: &CliArgs) -> Self {
        if let Some(ref profile) = args.initial_profile {
            self.initial_profile = Some(profile.clone());
        }
        if let Some(format) = args.output_format {
            self.output_format = format;
        }
        if let Some(section) = args.start_section {
            self.start_section = section;
        }
        self
    }

    /// Validates all settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.initial_profile {
            if !path.exists() {
                return Err(ConfigError::ValidationError(format!(
                    "Initial profile does not exist: {}",
                    path.display()
                )));
            }
            OutputFormat::from_path(path)?;
        }

        if self.save_message.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Save message cannot be empty".to_string(),
            ));
        }
        if self.cancel_message.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Cancel message cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    // Builder-style methods for convenient configuration

    /// Sets the initial profile path.
    pub fn with_initial_profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.initial_profile = Some(path.into());
        self
    }

    /// Sets the output format.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Sets the tab that is active at mount.
    pub fn with_start_section(mut self, section: Section) -> Self {
        self.start_section = section;
        self
    }
}

/// CLI argument structure for parsing command line options.
///
/// All fields are optional to allow partial overrides.
#[derive(Debug, Default, Clone)]
pub struct CliArgs {
    /// Profile file loaded at mount.
    pub initial_profile: Option<PathBuf>,
    /// Output format for printing.
    pub output_format: Option<OutputFormat>,
    /// Initially active tab.
    pub start_section: Option<Section>,
    /// Configuration file path.
    pub config_file: Option<PathBuf>,
}

impl CliArgs {
    /// Loads the final settings by applying the full configuration chain.
    ///
    /// 1. Default values
    /// 2. Configuration file (if specified)
    /// 3. Environment variables
    /// 4. CLI arguments (self)
    pub fn load_settings(&self) -> Result<FormSettings, ConfigError> {
        let mut settings = if let Some(ref config_file) = self.config_file {
            FormSettings::from_file(config_file)?
        } else {
            FormSettings::default()
        };

        settings = settings.merge_with_env();
        settings = settings.merge_with_args(self);

        settings.validate()?;

        Ok(settings)
    }
}
