//! Role records and the ordered role document.

use std::collections::BTreeSet;

use crate::caps::CapabilitySet;
use crate::error::DocumentError;

/// A set of group names that must ALL be held by a principal for the
/// requirement to match (AND semantics). Multiple requirements attached
/// to a role are OR'd against each other by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRequirement(Vec<String>);

impl GroupRequirement {
    /// A requirement over one or more group names.
    pub fn new(groups: impl IntoIterator<Item = String>) -> Self {
        Self(groups.into_iter().collect())
    }

    /// The group names, in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn has_empty_name(&self) -> bool {
        self.0.iter().any(|g| g.is_empty())
    }
}

/// What command text a [`CommandRule`] matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandPattern {
    /// Matches only a byte-identical command line. Case, whitespace and
    /// quoting are significant; no normalization is performed.
    Exact(String),
    /// Matches any command line.
    Any,
}

/// One command entry of a role: a pattern plus an optional capability
/// override. A declared override replaces the role default outright,
/// and an empty override is a real override ("no privileges"), distinct
/// from no override at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRule {
    /// The command text predicate.
    pub pattern: CommandPattern,
    /// Per-command capability override, if declared.
    pub caps: Option<CapabilitySet>,
}

impl CommandRule {
    /// An exact-text rule without an override.
    pub fn exact(text: impl Into<String>) -> Self {
        Self {
            pattern: CommandPattern::Exact(text.into()),
            caps: None,
        }
    }

    /// A match-anything rule without an override.
    pub fn any() -> Self {
        Self {
            pattern: CommandPattern::Any,
            caps: None,
        }
    }

    /// Attaches a capability override to the rule.
    pub fn with_caps(mut self, caps: CapabilitySet) -> Self {
        self.caps = Some(caps);
        self
    }
}

/// A named bundle of allowed principals, allowed commands and granted
/// capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Role name. Lookup is by name plus applicability, so duplicate
    /// names in one document are tolerated.
    pub name: String,
    /// Users granted the role directly.
    pub users: BTreeSet<String>,
    /// Group requirements, any one of which grants the role.
    pub group_requirements: Vec<GroupRequirement>,
    /// Command entries, in declaration order. May be empty: such a role
    /// is reportable but unusable for execution.
    pub commands: Vec<CommandRule>,
    /// Capabilities granted when the matched command entry carries no
    /// override of its own.
    pub default_caps: CapabilitySet,
}

impl Role {
    /// A role with no members, no commands and no capabilities.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            users: BTreeSet::new(),
            group_requirements: Vec::new(),
            commands: Vec::new(),
            default_caps: CapabilitySet::new(),
        }
    }

    /// Grants the role to a user by name.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.users.insert(user.into());
        self
    }

    /// Adds a group requirement.
    pub fn with_group_requirement(mut self, req: GroupRequirement) -> Self {
        self.group_requirements.push(req);
        self
    }

    /// Appends a command entry.
    pub fn with_command(mut self, rule: CommandRule) -> Self {
        self.commands.push(rule);
        self
    }

    /// Sets the role-default capability set.
    pub fn with_default_caps(mut self, caps: CapabilitySet) -> Self {
        self.default_caps = caps;
        self
    }

    /// Whether any command entry matches arbitrary command text.
    pub fn grants_any_command(&self) -> bool {
        self.commands
            .iter()
            .any(|c| c.pattern == CommandPattern::Any)
    }
}

/// An ordered, immutable snapshot of role declarations.
///
/// Declaration order is the authorization precedence: the resolver
/// consults roles front to back and the first match wins. Configuration
/// edits are modeled as loading a whole new snapshot, never as in-place
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDocument {
    roles: Vec<Role>,
}

impl RoleDocument {
    /// Assembles a document, checking structural preconditions. A
    /// malformed document is rejected whole; the engine never attempts
    /// partial resolution over one.
    pub fn new(roles: Vec<Role>) -> Result<Self, DocumentError> {
        for (idx, role) in roles.iter().enumerate() {
            if role.name.is_empty() {
                return Err(DocumentError::EmptyRoleName(idx));
            }
            if role.users.iter().any(|u| u.is_empty()) {
                return Err(DocumentError::EmptyUserName(role.name.clone()));
            }
            if role
                .group_requirements
                .iter()
                .any(|r| r.is_empty() || r.has_empty_name())
            {
                return Err(DocumentError::EmptyGroupRequirement(role.name.clone()));
            }
            for rule in &role.commands {
                if matches!(&rule.pattern, CommandPattern::Exact(text) if text.is_empty()) {
                    return Err(DocumentError::EmptyCommandText(role.name.clone()));
                }
            }
        }
        Ok(Self { roles })
    }

    /// Roles in declaration (= precedence) order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Roles carrying `name`, in declaration order. Normally at most one.
    pub fn roles_named<'doc>(&'doc self, name: &str) -> Vec<&'doc Role> {
        self.roles.iter().filter(|r| r.name == name).collect()
    }
}
