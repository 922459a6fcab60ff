//! Privilege application and command launch.
//!
//! The engine hands back a [`Grant`]; actually confining the process to
//! the grant's capability set (and dropping uid/gid) is a platform step
//! behind the [`PrivilegeApplier`] trait so the decision logic stays
//! testable without privileges. Credentials travel as explicit values,
//! never through process-global state.

use std::os::unix::process::CommandExt;
use std::process::Command;

use thiserror::Error;
use tracing::info;
use zeroize::Zeroizing;

use capgate_policy::Grant;

/// Launch errors.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to apply privileges: {0}")]
    Apply(String),
    #[error("failed to execute command: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A credential collected by the caller (e.g. from PAM), passed by value
/// to the launch step. The backing memory is wiped on drop.
#[derive(Debug)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Wraps a secret collected from the caller.
    pub fn new(secret: String) -> Self {
        Self(Zeroizing::new(secret))
    }

    /// The secret, for the privilege-application step only.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

/// The platform step that confines the process to a grant before exec.
pub trait PrivilegeApplier {
    /// Applies the grant's capability set (and any credential-gated
    /// uid/gid change) to the current process.
    fn apply(&self, grant: &Grant<'_>, credential: Option<&Credential>) -> Result<(), ExecError>;
}

/// Applier used by the binary: records what is being granted. The
/// kernel-facing confinement (ambient/inheritable capability raise) is
/// the deployment integration point and deliberately lives outside the
/// decision core.
#[derive(Debug, Default)]
pub struct LoggingApplier;

impl PrivilegeApplier for LoggingApplier {
    fn apply(&self, grant: &Grant<'_>, _credential: Option<&Credential>) -> Result<(), ExecError> {
        if grant.full_privileges() {
            info!(role = %grant.role.name, "granting full privileges");
        } else {
            info!(role = %grant.role.name, caps = %grant.caps, "granting capabilities");
        }
        Ok(())
    }
}

/// Applies the grant, then replaces the current process with the command
/// (or with a shell when the grant carries no command). Returns only on
/// failure.
pub fn launch(
    shell: &str,
    command: Option<&str>,
    grant: &Grant<'_>,
    credential: Option<&Credential>,
    applier: &dyn PrivilegeApplier,
) -> ExecError {
    if let Err(e) = applier.apply(grant, credential) {
        return e;
    }
    let mut cmd = Command::new(shell);
    if let Some(line) = command {
        cmd.arg("-c").arg(line);
    }
    // exec only returns on failure.
    ExecError::Spawn(cmd.exec())
}
