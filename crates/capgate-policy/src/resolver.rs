//! Execute-mode authorization: ordered first-match-wins resolution.

use crate::caps::CapabilitySet;
use crate::error::Denial;
use crate::matcher::{matches_command, matches_principal};
use crate::principal::Principal;
use crate::role::{CommandPattern, CommandRule, Role, RoleDocument};

/// A successful authorization: the winning role and the resultant
/// capability set, ready to hand to the privilege-application step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant<'a> {
    /// The role that authorized the request.
    pub role: &'a Role,
    /// The command entry that matched, when a command was requested.
    pub matched: Option<&'a CommandRule>,
    /// Capabilities to confine the command with.
    pub caps: CapabilitySet,
}

impl<'a> Grant<'a> {
    fn new(role: &'a Role, matched: Option<&'a CommandRule>) -> Self {
        let caps = compose(role, matched);
        Self { role, matched, caps }
    }

    pub(crate) fn for_match(role: &'a Role, rule: &'a CommandRule) -> Self {
        Self::new(role, Some(rule))
    }

    /// Whether the grant was unrestricted on the command side: either the
    /// match went through a match-anything entry, or no command was
    /// requested and the role carries one.
    pub fn unrestricted(&self) -> bool {
        match self.matched {
            Some(rule) => rule.pattern == CommandPattern::Any,
            None => self.role.grants_any_command(),
        }
    }

    /// The "full privileges" sentinel: an unrestricted command match with
    /// an empty capability set is an unconditional grant, reported as
    /// such rather than as "no capabilities".
    pub fn full_privileges(&self) -> bool {
        self.unrestricted() && self.caps.is_empty()
    }
}

/// Computes the resultant capability set for a matched (role, command)
/// pair. A per-command override replaces the role default outright; it
/// never unions with it.
pub fn compose(role: &Role, matched: Option<&CommandRule>) -> CapabilitySet {
    match matched.and_then(|rule| rule.caps.as_ref()) {
        Some(override_caps) => override_caps.clone(),
        None => role.default_caps.clone(),
    }
}

/// Decides whether `who` may execute under `doc`.
///
/// Candidates are scanned in declaration order and the first role
/// matching the principal — and the command, when one is requested —
/// wins; later roles are never consulted. With `role_filter` set, only
/// roles of that name are candidates, and a filter naming a role that
/// does not exist is indistinguishable from one naming a role the
/// principal cannot use.
pub fn resolve<'a>(
    doc: &'a RoleDocument,
    who: &Principal,
    role_filter: Option<&str>,
    command: Option<&str>,
) -> Result<Grant<'a>, Denial> {
    match role_filter {
        Some(name) => {
            let mut principal_matched = false;
            for role in doc.roles_named(name) {
                if !matches_principal(role, who) {
                    continue;
                }
                principal_matched = true;
                match command {
                    None => return Ok(Grant::new(role, None)),
                    Some(cmd) => {
                        if let Some(rule) = matches_command(role, cmd) {
                            return Ok(Grant::new(role, Some(rule)));
                        }
                    }
                }
            }
            if principal_matched {
                Err(Denial::CommandNotGranted)
            } else {
                Err(Denial::RoleNotApplicable(name.to_string()))
            }
        }
        None => {
            for role in doc.roles() {
                if !matches_principal(role, who) {
                    continue;
                }
                match command {
                    None => return Ok(Grant::new(role, None)),
                    Some(cmd) => {
                        if let Some(rule) = matches_command(role, cmd) {
                            return Ok(Grant::new(role, Some(rule)));
                        }
                    }
                }
            }
            // Whether the principal matched some role is deliberately not
            // distinguishable here: leaking it would let unauthorized
            // callers enumerate roles.
            Err(Denial::CommandNotGranted)
        }
    }
}
