//! Unified error handling for the capgate binary.
//!
//! Denials are ordinary outcomes reported to the user with a nonzero
//! exit; configuration and system problems carry their own exit codes so
//! wrappers can tell them apart. Nothing here panics or aborts.

use thiserror::Error;

use crate::config::ConfigError;
use crate::exec::ExecError;
use crate::identity::IdentityError;
use capgate_policy::Denial;

/// Top-level errors of one invocation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Denied(#[from] Denial),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Denied(_) => 1,
            Self::Config(_) => 2,
            Self::Identity(_) => 3,
            Self::Exec(_) => 4,
        }
    }

    /// Static label for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_invalid",
            Self::Identity(_) => "identity_lookup",
            Self::Denied(Denial::RoleNotApplicable(_)) => "role_not_applicable",
            Self::Denied(Denial::CommandNotGranted) => "command_not_granted",
            Self::Exec(_) => "exec_failed",
        }
    }
}
