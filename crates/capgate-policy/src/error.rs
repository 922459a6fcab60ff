//! Engine outcome and precondition errors.
//!
//! Denials are ordinary outcomes, not failures: the engine returns them
//! for the caller to render and never logs or aborts. Document errors are
//! fatal preconditions; resolution is never attempted on a malformed
//! document.

use thiserror::Error;

/// Why a resolution request was refused.
///
/// The `Display` text is the user-facing diagnostic the CLI layer prints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    /// An explicitly requested role does not exist or does not apply to
    /// the principal. The two cases are deliberately indistinguishable.
    #[error("you can't use the role \"{0}\"")]
    RoleNotApplicable(String),

    /// No role authorizes the requested command. Also returned when the
    /// principal matches no role at all, so that unauthorized callers
    /// cannot probe which roles exist.
    #[error("you can't execute this command")]
    CommandNotGranted,
}

/// Structural problems detected when assembling a [`RoleDocument`].
///
/// [`RoleDocument`]: crate::role::RoleDocument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A role declaration has an empty name.
    #[error("invalid configuration: role #{0} has an empty name")]
    EmptyRoleName(usize),

    /// A role lists an empty user name.
    #[error("invalid configuration: role \"{0}\" lists an empty user name")]
    EmptyUserName(String),

    /// A group requirement is empty or contains an empty group name.
    #[error("invalid configuration: role \"{0}\" has an empty group requirement")]
    EmptyGroupRequirement(String),

    /// An exact command rule has empty command text.
    #[error("invalid configuration: role \"{0}\" has a command entry with no command line")]
    EmptyCommandText(String),
}
