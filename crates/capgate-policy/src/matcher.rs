//! Membership and command predicates over a single role.

use crate::principal::Principal;
use crate::role::{CommandPattern, CommandRule, Role};

/// Whether `who` may use `role` at all: direct user membership, or any
/// one group requirement fully satisfied by the caller's groups.
///
/// A role listing no users and no group requirements matches nobody.
pub fn matches_principal(role: &Role, who: &Principal) -> bool {
    if role.users.contains(&who.username) {
        return true;
    }
    role.group_requirements
        .iter()
        .any(|req| who.holds_all_groups(req.groups()))
}

/// The command entry of `role` that authorizes `command`, if any.
///
/// Exact entries are compared by byte identity, with no case folding or
/// whitespace normalization. An exact entry wins over a match-anything
/// entry regardless of declaration order, so a per-command capability
/// override is never shadowed by a catch-all.
pub fn matches_command<'a>(role: &'a Role, command: &str) -> Option<&'a CommandRule> {
    let mut any_rule = None;
    for rule in &role.commands {
        match &rule.pattern {
            CommandPattern::Exact(text) if text == command => return Some(rule),
            CommandPattern::Any => any_rule = any_rule.or(Some(rule)),
            CommandPattern::Exact(_) => {}
        }
    }
    any_rule
}
