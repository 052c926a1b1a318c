//! Configuration module for the profile form host.
//!
//! Settings are loaded from multiple sources with the following precedence
//! (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`PROFILE_FORM_*`)
//! 3. Configuration file (TOML or JSON)
//! 4. Default values

mod settings;

pub use settings::{CliArgs, ConfigError, FormSettings, OutputFormat};
