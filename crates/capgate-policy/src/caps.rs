//! Linux capability identifiers and capability sets.
//!
//! Capabilities are opaque to the engine beyond identity: they are parsed
//! once at configuration-load time and carried through resolution as
//! [`CapabilitySet`] values.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a capability name is not part of the Linux
/// capability namespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown capability: {0}")]
pub struct UnknownCapability(pub String);

macro_rules! capabilities {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A Linux capability, e.g. `cap_net_raw` or `cap_sys_admin`.
        ///
        /// The set of variants tracks `linux/capability.h` up to
        /// `CAP_CHECKPOINT_RESTORE`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[allow(missing_docs)]
        pub enum Capability {
            $($variant,)+
        }

        impl Capability {
            /// All capabilities, in kernel numbering order.
            pub const ALL: &'static [Capability] = &[$(Capability::$variant,)+];

            /// The conventional lowercase name, e.g. `"cap_net_raw"`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Capability::$variant => $name,)+
                }
            }
        }

        impl FromStr for Capability {
            type Err = UnknownCapability;

            /// Parses the conventional `cap_*` spelling, case-insensitively.
            /// The `cap_` prefix may be omitted (`"net_raw"` == `"cap_net_raw"`).
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.to_ascii_lowercase();
                let bare = lower.strip_prefix("cap_").unwrap_or(&lower);
                match format!("cap_{bare}").as_str() {
                    $($name => Ok(Capability::$variant),)+
                    _ => Err(UnknownCapability(s.to_string())),
                }
            }
        }
    };
}

capabilities! {
    Chown => "cap_chown",
    DacOverride => "cap_dac_override",
    DacReadSearch => "cap_dac_read_search",
    Fowner => "cap_fowner",
    Fsetid => "cap_fsetid",
    Kill => "cap_kill",
    Setgid => "cap_setgid",
    Setuid => "cap_setuid",
    Setpcap => "cap_setpcap",
    LinuxImmutable => "cap_linux_immutable",
    NetBindService => "cap_net_bind_service",
    NetBroadcast => "cap_net_broadcast",
    NetAdmin => "cap_net_admin",
    NetRaw => "cap_net_raw",
    IpcLock => "cap_ipc_lock",
    IpcOwner => "cap_ipc_owner",
    SysModule => "cap_sys_module",
    SysRawio => "cap_sys_rawio",
    SysChroot => "cap_sys_chroot",
    SysPtrace => "cap_sys_ptrace",
    SysPacct => "cap_sys_pacct",
    SysAdmin => "cap_sys_admin",
    SysBoot => "cap_sys_boot",
    SysNice => "cap_sys_nice",
    SysResource => "cap_sys_resource",
    SysTime => "cap_sys_time",
    SysTtyConfig => "cap_sys_tty_config",
    Mknod => "cap_mknod",
    Lease => "cap_lease",
    AuditWrite => "cap_audit_write",
    AuditControl => "cap_audit_control",
    Setfcap => "cap_setfcap",
    MacOverride => "cap_mac_override",
    MacAdmin => "cap_mac_admin",
    Syslog => "cap_syslog",
    WakeAlarm => "cap_wake_alarm",
    BlockSuspend => "cap_block_suspend",
    AuditRead => "cap_audit_read",
    Perfmon => "cap_perfmon",
    Bpf => "cap_bpf",
    CheckpointRestore => "cap_checkpoint_restore",
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A duplicate-free set of [`Capability`] values.
///
/// The empty set is a valid grant ("no privileges") and is distinct from
/// the unrestricted sentinel, which is a property of the match that
/// produced the set, not of the set itself (see `Grant::full_privileges`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `cap` is a member.
    pub fn contains(&self, cap: Capability) -> bool {
        self.0.contains(&cap)
    }

    /// Adds a capability; duplicates are ignored.
    pub fn insert(&mut self, cap: Capability) {
        self.0.insert(cap);
    }

    /// Set union, consuming neither operand.
    pub fn union(&self, other: &CapabilitySet) -> CapabilitySet {
        CapabilitySet(self.0.union(&other.0).copied().collect())
    }

    /// Members of `self` not present in `other`.
    pub fn subtract(&self, other: &CapabilitySet) -> CapabilitySet {
        CapabilitySet(self.0.difference(&other.0).copied().collect())
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates members in kernel numbering order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        CapabilitySet(iter.into_iter().collect())
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for cap in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{cap}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefix_and_case_variants() {
        assert_eq!("cap_net_raw".parse::<Capability>(), Ok(Capability::NetRaw));
        assert_eq!("CAP_NET_RAW".parse::<Capability>(), Ok(Capability::NetRaw));
        assert_eq!("net_raw".parse::<Capability>(), Ok(Capability::NetRaw));
        assert!("cap_warp_drive".parse::<Capability>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for cap in Capability::ALL {
            assert_eq!(cap.name().parse::<Capability>(), Ok(*cap));
        }
    }

    #[test]
    fn set_deduplicates() {
        let mut set = CapabilitySet::new();
        set.insert(Capability::NetRaw);
        set.insert(Capability::NetRaw);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn union_and_subtract() {
        let a: CapabilitySet = [Capability::NetRaw, Capability::SysAdmin].into_iter().collect();
        let b: CapabilitySet = [Capability::SysAdmin].into_iter().collect();
        assert_eq!(a.union(&b).len(), 2);
        let diff = a.subtract(&b);
        assert!(diff.contains(Capability::NetRaw));
        assert!(!diff.contains(Capability::SysAdmin));
    }

    #[test]
    fn display_joins_names() {
        let set: CapabilitySet = [Capability::SysAdmin, Capability::NetRaw].into_iter().collect();
        assert_eq!(set.to_string(), "cap_net_raw, cap_sys_admin");
    }
}
