//! Caller identity resolution.
//!
//! Builds the engine's [`Principal`] from the real uid of the calling
//! process: passwd name plus the full effective group-name list. The
//! primary group is not distinguished from supplementary ones.

use std::collections::BTreeSet;
use std::ffi::CString;

use nix::unistd::{getgrouplist, getuid, Group, Uid, User};
use thiserror::Error;
use tracing::debug;

use capgate_policy::Principal;

/// Identity resolution errors.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("system identity lookup failed: {0}")]
    Lookup(#[from] nix::Error),
    #[error("uid {0} has no passwd entry")]
    UnknownUid(u32),
    #[error("username contains an interior NUL byte")]
    BadUsername(#[from] std::ffi::NulError),
}

/// Resolves the principal for the calling process.
pub fn current_principal() -> Result<Principal, IdentityError> {
    principal_for_uid(getuid())
}

/// Resolves the principal for an arbitrary uid.
pub fn principal_for_uid(uid: Uid) -> Result<Principal, IdentityError> {
    let user = User::from_uid(uid)?.ok_or_else(|| IdentityError::UnknownUid(uid.as_raw()))?;
    let name = CString::new(user.name.clone())?;
    let mut groups = BTreeSet::new();
    for gid in getgrouplist(&name, user.gid)? {
        // Groups without a name database entry cannot be referenced from
        // the policy file, so they are skipped rather than fatal.
        if let Some(group) = Group::from_gid(gid)? {
            groups.insert(group.name);
        }
    }
    debug!(user = %user.name, groups = groups.len(), "resolved caller identity");
    Ok(Principal::new(user.name, groups))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_principal_reflects_the_running_user() {
        let principal = current_principal().expect("caller must have a passwd entry");
        assert!(!principal.username.is_empty());
    }
}
