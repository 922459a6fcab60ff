//! Configuration validation.
//!
//! Validates the policy file at load time and reports every problem
//! found rather than stopping at the first.

use thiserror::Error;

use super::roles::RoleBlock;
use super::types::Config;

/// Validation errors for the policy file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("general.shell must not be empty")]
    EmptyShell,
    #[error("role #{0} has an empty name")]
    EmptyRoleName(usize),
    #[error("role \"{role}\": unknown capability \"{name}\"")]
    UnknownCapability { role: String, name: String },
    #[error("role \"{role}\": a command entry must set exactly one of `run` and `any`")]
    AmbiguousCommandEntry { role: String },
    #[error("role \"{role}\": empty group entry")]
    EmptyGroupEntry { role: String },
    #[error("role \"{role}\": empty user name")]
    EmptyUserName { role: String },
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.general.shell.is_empty() {
        errors.push(ValidationError::EmptyShell);
    }

    for (idx, role) in config.roles.iter().enumerate() {
        if role.name.is_empty() {
            errors.push(ValidationError::EmptyRoleName(idx));
            continue;
        }
        check_role(role, &mut errors);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_role(role: &RoleBlock, errors: &mut Vec<ValidationError>) {
    use super::roles::GroupEntry;

    if role.users.iter().any(|u| u.is_empty()) {
        errors.push(ValidationError::EmptyUserName {
            role: role.name.clone(),
        });
    }
    for entry in &role.groups {
        let empty = match entry {
            GroupEntry::One(name) => name.is_empty(),
            GroupEntry::All(names) => names.is_empty() || names.iter().any(|n| n.is_empty()),
        };
        if empty {
            errors.push(ValidationError::EmptyGroupEntry {
                role: role.name.clone(),
            });
        }
    }
    // Capability names and command-entry shapes are checked by the same
    // mapping the document build uses, so load and build cannot disagree.
    if let Err(e) = role.to_role() {
        errors.push(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn valid_config_passes() {
        let cfg = config(
            r#"
[[role]]
name = "net"
users = ["alice"]
capabilities = ["cap_net_raw"]

[[role.command]]
run = "ping -c 1 host"
"#,
        );
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn all_problems_are_collected() {
        let cfg = config(
            r#"
[general]
shell = ""

[[role]]
name = ""

[[role]]
name = "bad"
capabilities = ["cap_time_travel"]
"#,
        );
        let errors = validate(&cfg).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::EmptyShell));
        assert!(errors.contains(&ValidationError::EmptyRoleName(0)));
    }

    #[test]
    fn empty_group_conjunction_is_rejected() {
        let cfg = config(
            r#"
[[role]]
name = "r"
groups = [[]]
"#,
        );
        let errors = validate(&cfg).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::EmptyGroupEntry { role } if role == "r"
        )));
    }
}
