//! Human-readable rendering of engine reports.
//!
//! The engine mandates the content of each report (which roles, which
//! command categories, which capability summaries, which suggested
//! invocations); the line layout here is the tool's own. Everything is
//! rendered to a string so the CLI can print it atomically and tests can
//! assert on it.

use std::fmt::Write;

use capgate_policy::{CommandListing, Grant, Principal, Report, RoleSummary};

/// Renders a report for `who` into the text printed by `capgate -i`.
pub fn render(report: &Report<'_>, who: &Principal) -> String {
    let user = &who.username;
    let mut out = String::new();
    match report {
        Report::Roles(summaries) => {
            if summaries.is_empty() {
                let _ = writeln!(out, "As user \"{user}\" you can't use any role");
            } else {
                let _ = writeln!(out, "As user \"{user}\":");
                for summary in summaries {
                    role_block(&mut out, summary);
                }
            }
        }
        Report::Role(summary) => {
            let _ = writeln!(out, "As user \"{user}\":");
            role_block(&mut out, summary);
        }
        Report::RoleNotApplicable { role } => {
            let _ = writeln!(out, "As user \"{user}\" you can't use the role \"{role}\"");
        }
        Report::CommandDirect { command, grant } => {
            let _ = writeln!(out, "As user \"{user}\", you can execute this command:");
            let _ = writeln!(out, "  capgate -c \"{command}\"");
            grant_caps(&mut out, grant);
        }
        Report::CommandViaRoles { roles, .. } => {
            let _ = writeln!(
                out,
                "As user \"{user}\" you can execute this command with these roles:"
            );
            for summary in roles {
                role_block(&mut out, summary);
            }
        }
        Report::CommandNotGranted => {
            let _ = writeln!(out, "As user \"{user}\" you can't execute this command");
        }
        Report::Verdict {
            role,
            command,
            outcome,
        } => match outcome {
            Some(verdict) if verdict.simplified => {
                let _ = writeln!(
                    out,
                    "As user \"{user}\" you can execute \"{command}\" with this simplified command:"
                );
                let _ = writeln!(out, "  capgate -c \"{command}\"");
                grant_caps(&mut out, &verdict.grant);
            }
            Some(verdict) => {
                let _ = writeln!(
                    out,
                    "As user \"{user}\" you can execute \"{command}\" with command:"
                );
                let _ = writeln!(out, "  capgate -r \"{role}\" -c \"{command}\"");
                grant_caps(&mut out, &verdict.grant);
            }
            None => {
                let _ = writeln!(out, "As user \"{user}\" you can't execute this command");
            }
        },
    }
    out
}

fn role_block(out: &mut String, summary: &RoleSummary<'_>) {
    let name = &summary.role.name;
    match summary.listing() {
        CommandListing::Any => {
            let _ = writeln!(out, "- you can use the role \"{name}\" with any commands");
        }
        CommandListing::None => {
            let _ = writeln!(out, "- you can use the role \"{name}\" without any commands");
        }
        CommandListing::Only(commands) => {
            let _ = writeln!(
                out,
                "- you can use the role \"{name}\" only with these commands:"
            );
            for command in commands {
                let _ = writeln!(out, "  - {command}");
            }
        }
    }
    if summary.full_privileges() {
        let _ = writeln!(out, "  and grants full privileges");
    } else if !summary.caps().is_empty() {
        let _ = writeln!(out, "  and grants these privileges: {}", summary.caps());
    } else {
        let _ = writeln!(out, "  and doesn't grant any privileges");
    }
}

fn grant_caps(out: &mut String, grant: &Grant<'_>) {
    if grant.full_privileges() {
        let _ = writeln!(out, "  and grants full privileges");
    } else if !grant.caps.is_empty() {
        let _ = writeln!(out, "  and grants these privileges: {}", grant.caps);
    } else {
        let _ = writeln!(out, "  and doesn't grant any privileges");
    }
}
