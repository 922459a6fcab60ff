//! Command-line surface of the delegator.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// Run a command with a role's capabilities, or explain what a role
/// would grant.
#[derive(Debug, Parser)]
#[command(name = "capgate", version, about = "Capability-based privilege delegation")]
pub struct Cli {
    /// Role to assume; without it, the first applicable role is used.
    #[arg(short = 'r', long = "role", value_name = "ROLE")]
    pub role: Option<String>,

    /// Command line to execute (or to ask about with -i).
    #[arg(short = 'c', long = "command", value_name = "COMMAND")]
    pub command: Option<String>,

    /// Explain what is granted instead of executing anything.
    #[arg(short = 'i', long = "info")]
    pub info: bool,

    /// Delegation policy file.
    #[arg(long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}
