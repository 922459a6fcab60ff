//! # capgate-policy
//!
//! The role resolution and capability-computation engine behind the
//! `capgate` privilege delegator.
//!
//! Given a caller identity, an ordered role document and optional role
//! and command filters, the engine decides whether execution is
//! authorized, under which role, and with which resultant Linux
//! capability set. The same primitives answer enumeration queries
//! ("what could I do") for the delegator's informational mode.
//!
//! ## Design
//!
//! - Declaration order is authorization precedence: first match wins.
//! - Per-command capability overrides replace the role default, never
//!   union with it.
//! - Denials are values, not errors: the engine never logs, prompts,
//!   executes or touches the filesystem. Loading configuration into a
//!   [`RoleDocument`] and applying a [`Grant`]'s capabilities to a
//!   process both live with the caller.
//!
//! ```rust
//! use capgate_policy::{
//!     CommandRule, Principal, Role, RoleDocument, resolve,
//! };
//!
//! let doc = RoleDocument::new(vec![
//!     Role::named("ping").with_user("alice").with_command(CommandRule::exact("ping host")),
//! ]).unwrap();
//! let alice = Principal::new("alice", []);
//! let grant = resolve(&doc, &alice, None, Some("ping host")).unwrap();
//! assert_eq!(grant.role.name, "ping");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod caps;
pub mod error;
pub mod explain;
pub mod matcher;
pub mod principal;
pub mod resolver;
pub mod role;

pub use caps::{Capability, CapabilitySet, UnknownCapability};
pub use error::{Denial, DocumentError};
pub use explain::{explain, CommandListing, Report, RoleSummary, VerdictGrant};
pub use matcher::{matches_command, matches_principal};
pub use principal::Principal;
pub use resolver::{compose, resolve, Grant};
pub use role::{CommandPattern, CommandRule, GroupRequirement, Role, RoleDocument};
