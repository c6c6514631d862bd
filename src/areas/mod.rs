//! Core repository components
//!
//! - `database`: Loose-object database for reading blobs, trees, commits and tags
//! - `refs`: Reference lookup (HEAD, branches, tags, remotes, packed refs)
//! - `shallow`: The shallow boundary of a truncated clone
//! - `repository`: Binds the above and serves history queries

pub mod database;
pub mod refs;
pub mod repository;
pub mod shallow;
