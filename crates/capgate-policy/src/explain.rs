//! Enumeration ("what could I do") mode over the same matcher primitives.
//!
//! Nothing here executes or mutates: each call is a pure function of the
//! document, the principal and the filters. Roles outside the
//! principal's reach never appear in any report variant, so explain
//! output cannot be used to enumerate other people's roles.

use crate::caps::CapabilitySet;
use crate::matcher::{matches_command, matches_principal};
use crate::principal::Principal;
use crate::resolver::{resolve, Grant};
use crate::role::{CommandPattern, Role, RoleDocument};

/// How a role's command list is categorized for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandListing<'a> {
    /// The role carries a match-anything entry ("with any commands").
    Any,
    /// The role has no command entries at all ("without any commands").
    None,
    /// Only these exact command lines, in declaration order.
    Only(Vec<&'a str>),
}

/// One reachable role, as reported by unfiltered or role-filtered
/// enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary<'a> {
    /// The role being summarized.
    pub role: &'a Role,
}

impl<'a> RoleSummary<'a> {
    /// Categorizes the role's command entries.
    pub fn listing(&self) -> CommandListing<'a> {
        if self.role.grants_any_command() {
            return CommandListing::Any;
        }
        if self.role.commands.is_empty() {
            return CommandListing::None;
        }
        CommandListing::Only(
            self.role
                .commands
                .iter()
                .filter_map(|rule| match &rule.pattern {
                    CommandPattern::Exact(text) => Some(text.as_str()),
                    CommandPattern::Any => None,
                })
                .collect(),
        )
    }

    /// The role-level capability set.
    pub fn caps(&self) -> &CapabilitySet {
        &self.role.default_caps
    }

    /// The unconditional-grant sentinel: any-command entries with no
    /// capability restriction.
    pub fn full_privileges(&self) -> bool {
        self.role.grants_any_command() && self.role.default_caps.is_empty()
    }
}

/// A role+command verdict that came out granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictGrant<'a> {
    /// The underlying grant, with composed capabilities.
    pub grant: Grant<'a>,
    /// True when the command is listed exactly, so the role filter is
    /// redundant and the invocation can drop it.
    pub simplified: bool,
}

/// The Info Reporter's output. Layout is the caller's concern; this is
/// the full required content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report<'a> {
    /// Unfiltered enumeration of every reachable role, in declaration
    /// order. May be empty.
    Roles(Vec<RoleSummary<'a>>),
    /// Role-filtered enumeration: the named role is reachable.
    Role(RoleSummary<'a>),
    /// Role-filtered enumeration: the named role is absent or out of
    /// reach. The diagnostic must name the role.
    RoleNotApplicable {
        /// The requested role name.
        role: String,
    },
    /// Command filter: a reachable role lists the command exactly, so
    /// the plain `-c` invocation works as-is.
    CommandDirect {
        /// The requested command line, verbatim.
        command: String,
        /// Grant composed from the exact entry that matched.
        grant: Grant<'a>,
    },
    /// Command filter: no exact listing, but these reachable roles allow
    /// the command through their match-anything entries.
    CommandViaRoles {
        /// The requested command line, verbatim.
        command: String,
        /// The allowing roles, in declaration order.
        roles: Vec<RoleSummary<'a>>,
    },
    /// Command filter: nothing reachable allows the command. No role
    /// listing is attached — a miss must not leak the baseline
    /// enumeration.
    CommandNotGranted,
    /// Role + command filter: a single yes/no verdict.
    Verdict {
        /// The requested role name.
        role: String,
        /// The requested command line, verbatim.
        command: String,
        /// `Some` when granted; `None` renders as the command denial.
        outcome: Option<VerdictGrant<'a>>,
    },
}

/// Answers "what could I do" for `who` under `doc`, narrowed by the
/// optional role and command filters.
pub fn explain<'a>(
    doc: &'a RoleDocument,
    who: &Principal,
    role_filter: Option<&str>,
    command_filter: Option<&str>,
) -> Report<'a> {
    match (role_filter, command_filter) {
        (None, None) => Report::Roles(reachable_summaries(doc, who)),
        (Some(name), None) => doc
            .roles_named(name)
            .into_iter()
            .find(|role| matches_principal(role, who))
            .map(|role| Report::Role(RoleSummary { role }))
            .unwrap_or_else(|| Report::RoleNotApplicable {
                role: name.to_string(),
            }),
        (None, Some(command)) => explain_command(doc, who, command),
        (Some(name), Some(command)) => {
            let outcome = resolve(doc, who, Some(name), Some(command))
                .ok()
                .map(|grant| {
                    let simplified = matches!(
                        grant.matched.map(|rule| &rule.pattern),
                        Some(CommandPattern::Exact(_))
                    );
                    VerdictGrant { grant, simplified }
                });
            Report::Verdict {
                role: name.to_string(),
                command: command.to_string(),
                outcome,
            }
        }
    }
}

fn reachable_summaries<'a>(doc: &'a RoleDocument, who: &Principal) -> Vec<RoleSummary<'a>> {
    doc.roles()
        .iter()
        .filter(|role| matches_principal(role, who))
        .map(|role| RoleSummary { role })
        .collect()
}

fn explain_command<'a>(doc: &'a RoleDocument, who: &Principal, command: &str) -> Report<'a> {
    // An exact listing anywhere in reach wins: the plain -c invocation
    // would resolve to it, and its per-command override applies.
    for role in doc.roles() {
        if !matches_principal(role, who) {
            continue;
        }
        if let Some(rule) = matches_command(role, command) {
            if matches!(rule.pattern, CommandPattern::Exact(_)) {
                return Report::CommandDirect {
                    command: command.to_string(),
                    grant: Grant::for_match(role, rule),
                };
            }
        }
    }
    let via: Vec<_> = doc
        .roles()
        .iter()
        .filter(|role| matches_principal(role, who) && role.grants_any_command())
        .map(|role| RoleSummary { role })
        .collect();
    if via.is_empty() {
        Report::CommandNotGranted
    } else {
        Report::CommandViaRoles {
            command: command.to_string(),
            roles: via,
        }
    }
}
