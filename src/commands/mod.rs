//! Command implementations
//!
//! Following git's split:
//!
//! - `plumbing`: stable, machine-readable output (`rev-list`)
//! - `porcelain`: human-oriented output (`log`)
//!
//! Both are thin printers over the history queries in `artifacts::log`.

pub mod plumbing;
pub mod porcelain;
