//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use capgate_policy::{DocumentError, RoleDocument};

use super::roles::RoleBlock;
use super::validation::{validate, ValidationError};

/// Default location of the delegation policy file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/capgate.toml";

/// Shell used when a grant carries no explicit command.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Configuration errors. All of them abort the invocation: a policy file
/// that cannot be loaded whole is never partially applied.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {} problem(s) found", .0.len())]
    Validation(Vec<ValidationError>),
    #[error("invalid configuration: {0}")]
    Document(#[from] DocumentError),
}

/// The delegation policy file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// General tool settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Role declarations. Declaration order is authorization precedence.
    #[serde(default, rename = "role")]
    pub roles: Vec<RoleBlock>,
}

/// General tool settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Shell used to interpret command lines and to launch role shells.
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
        }
    }
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

impl Config {
    /// Loads and validates a policy file. Validation problems are
    /// collected exhaustively before the load is rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        validate(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Maps the declaration blocks into the engine's role document,
    /// preserving declaration order.
    pub fn document(&self) -> Result<RoleDocument, ConfigError> {
        let roles = self
            .roles
            .iter()
            .map(RoleBlock::to_role)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::Validation(vec![e]))?;
        Ok(RoleDocument::new(roles)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.general.shell, DEFAULT_SHELL);
        assert!(config.roles.is_empty());
    }

    #[test]
    fn roles_keep_declaration_order() {
        let config: Config = toml::from_str(
            r#"
[[role]]
name = "second-declared-first"
users = ["alice"]

[[role]]
name = "first-declared-second"
users = ["alice"]
"#,
        )
        .unwrap();
        let doc = config.document().unwrap();
        let names: Vec<_> = doc.roles().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["second-declared-first", "first-declared-second"]);
    }

    #[test]
    fn shell_override_is_honored() {
        let config: Config = toml::from_str("[general]\nshell = \"/bin/bash\"\n").unwrap();
        assert_eq!(config.general.shell, "/bin/bash");
    }
}
