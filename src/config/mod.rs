//! Configuration management module for flat-viewing
//!
//! Layered configuration loading with support for TOML files, environment
//! variable overrides and per-environment overlays.
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `FLATVIEW_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{BookingSettings, NotificationSettings, NotifierKind, Settings};
