//! Commit history traversal for `bitlog log`
//!
//! This module implements the two history queries:
//!
//! - `rev_list`: lazy, timestamp-ordered walk of the commit graph from one start commit,
//!   bounded by an optional depth and an optional `since` cutoff, stopping at the
//!   shallow boundary
//! - `file_history`: the commits at which one path changed content, optionally
//!   following renames by looking the content id up in older snapshots
//! - `path_lookup`: path → id resolution inside a tree, and the reverse id → paths
//!   search used for rename following
//!
//! ## Algorithm
//!
//! The walk keeps a frontier of discovered commits ordered by committer timestamp
//! (newest first) and only fetches a commit's parents when the next commit is
//! demanded, so a consumer that stops early never causes extra object reads.
//!
//! Both queries read objects through [`HistoryStore`]; the on-disk repository is one
//! implementation, tests use an in-memory one.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use std::collections::HashSet;
use thiserror::Error;

pub mod file_history;
pub mod path_lookup;
pub mod rev_list;


/// Read access to the objects history queries need
///
/// Implementations must return [`HistoryError::ObjectNotFound`] for ids they do not
/// hold; any other failure is propagated to the caller untouched.
pub trait HistoryStore {
    fn read_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit>;

    fn read_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree>;

    /// Commits whose parents are not available; empty for a full clone
    fn read_shallow_boundary(&self) -> anyhow::Result<HashSet<ObjectId>>;
}

impl<S: HistoryStore + ?Sized> HistoryStore for &S {
    fn read_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        (**self).read_commit(oid)
    }

    fn read_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        (**self).read_tree(oid)
    }

    fn read_shallow_boundary(&self) -> anyhow::Result<HashSet<ObjectId>> {
        (**self).read_shallow_boundary()
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("object {oid} is a {actual}, not a {expected}")]
    UnexpectedObjectType {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("ambiguous argument '{0}': unknown revision or path not in the working tree")]
    ReferenceNotFound(String),

    #[error("could not find file or directory '{path}' in commit {commit}")]
    PathNotFound { path: String, commit: ObjectId },
}

impl HistoryError {
    /// Whether `err` is one of the not-found kinds, however deeply it was wrapped
    pub fn is_not_found(err: &anyhow::Error) -> bool {
        err.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<HistoryError>(),
                Some(
                    HistoryError::ObjectNotFound(_)
                        | HistoryError::ReferenceNotFound(_)
                        | HistoryError::PathNotFound { .. }
                )
            )
        })
    }
}
