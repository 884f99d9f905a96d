//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, AdminConfig, CommandOverride)
//! - [`defaults`]: serde default value functions
//! - [`validation`]: whole-config checks run on every load

mod defaults;
mod types;
mod validation;

pub use types::{AdminConfig, CommandOverride, Config, ConfigError};
pub use validation::{ValidationError, validate};
