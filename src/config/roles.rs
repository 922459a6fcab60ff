//! Role declaration blocks.
//!
//! The TOML shapes mirror the policy model: a role grants its user list
//! and group requirements an ordered list of command entries plus a
//! default capability set. A `groups` entry may be a single name or an
//! array of names that must all be held (the "array of groups" AND
//! shape); plain entries are alternatives.

use serde::Deserialize;

use capgate_policy::{
    Capability, CapabilitySet, CommandPattern, CommandRule, GroupRequirement, Role,
};

use super::validation::ValidationError;

/// One `[[role]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleBlock {
    /// Role name used with `-r`.
    pub name: String,
    /// Users granted this role directly.
    #[serde(default)]
    pub users: Vec<String>,
    /// Group requirements; any one grants the role.
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    /// Role-default capability names (`cap_*`).
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Ordered command entries.
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandBlock>,
}

/// One `groups` entry: a single group name, or an array of names that
/// must all be present for the entry to match.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GroupEntry {
    /// A single required group.
    One(String),
    /// A conjunction of required groups.
    All(Vec<String>),
}

/// One `[[role.command]]` table. Exactly one of `run` and `any` must be
/// given; `capabilities`, when present, overrides the role default for
/// this entry (an empty array is a real, empty override).
#[derive(Debug, Clone, Deserialize)]
pub struct CommandBlock {
    /// Exact command line this entry authorizes.
    #[serde(default)]
    pub run: Option<String>,
    /// Authorize any command line.
    #[serde(default)]
    pub any: bool,
    /// Per-command capability override.
    #[serde(default)]
    pub capabilities: Option<Vec<String>>,
}

impl RoleBlock {
    /// Maps the block into an engine role. Problems are reported against
    /// the role name so administrators can find the offending table.
    pub fn to_role(&self) -> Result<Role, ValidationError> {
        let mut role = Role::named(self.name.clone());
        for user in &self.users {
            role = role.with_user(user.clone());
        }
        for entry in &self.groups {
            let requirement = match entry {
                GroupEntry::One(name) => GroupRequirement::new([name.clone()]),
                GroupEntry::All(names) => GroupRequirement::new(names.iter().cloned()),
            };
            role = role.with_group_requirement(requirement);
        }
        role = role.with_default_caps(self.parse_caps(&self.capabilities)?);
        for block in &self.commands {
            role = role.with_command(block.to_rule(self)?);
        }
        Ok(role)
    }

    fn parse_caps(&self, names: &[String]) -> Result<CapabilitySet, ValidationError> {
        names
            .iter()
            .map(|name| {
                name.parse::<Capability>()
                    .map_err(|e| ValidationError::UnknownCapability {
                        role: self.name.clone(),
                        name: e.0,
                    })
            })
            .collect()
    }
}

impl CommandBlock {
    fn to_rule(&self, role: &RoleBlock) -> Result<CommandRule, ValidationError> {
        let pattern = match (&self.run, self.any) {
            (Some(text), false) => CommandPattern::Exact(text.clone()),
            (None, true) => CommandPattern::Any,
            _ => {
                return Err(ValidationError::AmbiguousCommandEntry {
                    role: role.name.clone(),
                })
            }
        };
        let caps = match &self.capabilities {
            Some(names) => Some(role.parse_caps(names)?),
            None => None,
        };
        Ok(CommandRule { pattern, caps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(toml: &str) -> RoleBlock {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn group_entries_cover_both_shapes() {
        let role = block(
            r#"
name = "mixed"
groups = ["adm", ["web", "deploy"]]
"#,
        )
        .to_role()
        .unwrap();
        assert_eq!(role.group_requirements.len(), 2);
        let conjunction: Vec<_> = role.group_requirements[1].groups().collect();
        assert_eq!(conjunction, ["web", "deploy"]);
    }

    #[test]
    fn empty_capability_override_survives_mapping() {
        let role = block(
            r#"
name = "net"
capabilities = ["cap_net_raw"]

[[command]]
run = "command1"
capabilities = []
"#,
        )
        .to_role()
        .unwrap();
        let rule = &role.commands[0];
        assert_eq!(rule.caps.as_ref().map(CapabilitySet::len), Some(0));
        assert_eq!(role.default_caps.len(), 1);
    }

    #[test]
    fn unknown_capability_is_reported_with_the_role() {
        let err = block(
            r#"
name = "bad"
capabilities = ["cap_time_travel"]
"#,
        )
        .to_role()
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownCapability { role, name }
                if role == "bad" && name == "cap_time_travel"
        ));
    }

    #[test]
    fn command_entry_needs_exactly_one_pattern() {
        let err = block(
            r#"
name = "bad"

[[command]]
run = "ls"
any = true
"#,
        )
        .to_role()
        .unwrap_err();
        assert!(matches!(err, ValidationError::AmbiguousCommandEntry { role } if role == "bad"));
    }
}
