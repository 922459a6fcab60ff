//! Integration test common infrastructure.
//!
//! Provides tempfile-backed policy fixtures and principal builders for
//! exercising load -> resolve/explain -> render end to end.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use capgate::config::Config;
use capgate_policy::{Principal, RoleDocument};

/// A policy file on disk, swapped wholesale like a real deployment.
pub struct TestPolicy {
    dir: TempDir,
    path: PathBuf,
}

impl TestPolicy {
    /// Writes a policy file with the given TOML content.
    pub fn write(content: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("capgate.toml");
        std::fs::write(&path, content).expect("write policy file");
        Self { dir, path }
    }

    /// Replaces the whole file, as an administrator edit would.
    pub fn swap(&self, content: &str) {
        std::fs::write(&self.path, content).expect("swap policy file");
    }

    /// Path handed to `Config::load`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads a fresh snapshot, the way one invocation does.
    pub fn snapshot(&self) -> RoleDocument {
        Config::load(&self.path)
            .expect("load policy")
            .document()
            .expect("build document")
    }

    /// Keeps the backing dir alive explicitly in tests that move it.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// A principal with the given groups.
pub fn principal(user: &str, groups: &[&str]) -> Principal {
    Principal::new(user, groups.iter().map(|g| g.to_string()))
}

/// The enumeration fixture: two any-command roles (one of them
/// group-gated and capability-bearing), an exact-command role with an
/// empty override, a commandless role, a second exact-command role, and
/// one role out of the test users' reach.
pub const INFO_POLICY: &str = r#"
[[role]]
name = "info0"
users = ["alice"]
groups = ["adm"]

[[role.command]]
any = true

[[role]]
name = "info1"
users = ["alice"]
groups = ["adm"]
capabilities = ["cap_net_raw"]

[[role.command]]
any = true

[[role]]
name = "info2"
users = ["alice"]
groups = ["adm"]
capabilities = ["cap_net_raw"]

[[role.command]]
run = "command1"
capabilities = []

[[role]]
name = "info3"
users = ["alice"]
groups = ["adm"]
capabilities = ["cap_net_raw"]

[[role]]
name = "info4"
users = ["alice"]
groups = ["adm"]

[[role.command]]
run = "command2"

[[role]]
name = "hidden"
users = ["somebody-else"]

[[role.command]]
any = true
"#;
