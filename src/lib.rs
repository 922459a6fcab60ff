//! capgate - capability-based privilege delegation.
//!
//! The binary's building blocks: configuration loading, caller identity
//! resolution, report rendering and the privilege-application seam. The
//! decision logic itself lives in the `capgate-policy` crate; everything
//! in this crate is the shell around it.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod identity;
pub mod render;
