//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct and loading (Config, GeneralConfig, ConfigError)
//! - [`roles`]: Role declaration blocks and their mapping into the policy document
//! - [`validation`]: Startup validation that reports every problem found
//!
//! A configuration file is one immutable snapshot: the binary loads it
//! once per invocation and administrators swap the whole file to change
//! policy. Nothing here mutates a loaded document in place.

mod roles;
mod types;
mod validation;

pub use roles::{CommandBlock, GroupEntry, RoleBlock};
pub use types::{Config, ConfigError, GeneralConfig, DEFAULT_CONFIG_PATH, DEFAULT_SHELL};
pub use validation::{validate, ValidationError};
