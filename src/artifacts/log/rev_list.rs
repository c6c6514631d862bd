//! Lazy commit-graph walk
//!
//! Commits come out newest-first by committer timestamp. Branches of a merge are
//! interleaved through a frontier of discovered-but-not-yet-yielded commits, so
//! the order approximates a reverse-chronological merge of all lineages without
//! loading the whole history.
//!
//! The walk is pull-based: the parents of a yielded commit are only fetched when
//! the next commit is requested. Dropping the iterator is the stop signal; no
//! object is read after the last `next()` call returns.

use crate::artifacts::log::HistoryStore;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// A commit together with the id it was read under
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CommitRecord {
    pub oid: ObjectId,
    pub commit: Commit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevListOptions {
    /// Maximum number of commits to yield
    pub depth: Option<usize>,
    /// Exclusive lower bound on committer time, in unix seconds
    pub since: Option<i64>,
}

impl RevListOptions {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}

pub struct RevList<'s, S: HistoryStore + ?Sized> {
    store: &'s S,
    start: ObjectId,
    options: RevListOptions,
}

impl<'s, S: HistoryStore + ?Sized> RevList<'s, S> {
    pub fn new(store: &'s S, start: ObjectId, options: RevListOptions) -> Self {
        Self {
            store,
            start,
            options,
        }
    }

    /// Start the walk: reads the shallow boundary and the start commit
    ///
    /// A depth of zero yields nothing and reads nothing.
    pub fn into_iter(self) -> anyhow::Result<RevListIntoIter<'s, S>> {
        let mut iter = RevListIntoIter {
            store: self.store,
            options: self.options,
            shallow: HashSet::new(),
            frontier: Frontier::default(),
            pending_expansion: None,
            yielded: 0,
            finished: self.options.depth == Some(0),
        };

        if !iter.finished {
            iter.shallow = self.store.read_shallow_boundary()?;
            let commit = self.store.read_commit(&self.start)?;
            iter.frontier.push(CommitRecord::new(self.start, commit));
        }

        Ok(iter)
    }

    pub fn collect_commits(self) -> anyhow::Result<Vec<CommitRecord>> {
        self.into_iter()?.collect()
    }
}

pub struct RevListIntoIter<'s, S: HistoryStore + ?Sized> {
    store: &'s S,
    options: RevListOptions,
    shallow: HashSet<ObjectId>,
    frontier: Frontier,
    /// Last yielded commit, expanded on the next demand
    pending_expansion: Option<(ObjectId, Vec<ObjectId>)>,
    yielded: usize,
    finished: bool,
}

impl<S: HistoryStore + ?Sized> RevListIntoIter<'_, S> {
    fn step(&mut self) -> anyhow::Result<Option<CommitRecord>> {
        if let Some((oid, parents)) = self.pending_expansion.take() {
            self.expand(&oid, &parents)?;
        }

        let Some(candidate) = self.frontier.pop() else {
            return Ok(None);
        };

        if let Some(since) = self.options.since
            && candidate.commit.committer_timestamp() <= since
        {
            debug!(commit = %candidate.oid, since, "reached age limit");
            return Ok(None);
        }

        self.yielded += 1;
        if self.options.depth.is_some_and(|depth| self.yielded >= depth) {
            self.finished = true;
        } else {
            self.pending_expansion = Some((
                candidate.oid.clone(),
                candidate.commit.parents().to_vec(),
            ));
        }

        debug!(commit = %candidate.oid, count = self.yielded, "yielding commit");
        Ok(Some(candidate))
    }

    fn expand(&mut self, oid: &ObjectId, parents: &[ObjectId]) -> anyhow::Result<()> {
        if self.shallow.contains(oid) {
            trace!(commit = %oid, "shallow boundary, not expanding parents");
            return Ok(());
        }

        for parent in parents {
            if self.frontier.is_discovered(parent) {
                continue;
            }

            let commit = self.store.read_commit(parent)?;
            trace!(commit = %oid, %parent, "adding parent to frontier");
            self.frontier.push(CommitRecord::new(parent.clone(), commit));
        }

        Ok(())
    }
}

impl<S: HistoryStore + ?Sized> Iterator for RevListIntoIter<'_, S> {
    type Item = anyhow::Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.step() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: HistoryStore + ?Sized> FusedIterator for RevListIntoIter<'_, S> {}

/// Discovered commits waiting to be yielded
///
/// Newest committer timestamp first; equal timestamps come out in discovery order.
/// Every id ever pushed stays in `discovered`, which keeps the heap free of
/// duplicates and stops a commit from being yielded twice even when clock skew puts
/// a parent ahead of its child.
#[derive(Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    discovered: HashSet<ObjectId>,
    next_seq: u64,
}

impl Frontier {
    fn push(&mut self, record: CommitRecord) {
        if !self.discovered.insert(record.oid.clone()) {
            return;
        }

        self.heap.push(FrontierEntry {
            timestamp: record.commit.committer_timestamp(),
            seq: Reverse(self.next_seq),
            record,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<CommitRecord> {
        self.heap.pop().map(|entry| entry.record)
    }

    fn is_discovered(&self, oid: &ObjectId) -> bool {
        self.discovered.contains(oid)
    }
}

struct FrontierEntry {
    timestamp: i64,
    seq: Reverse<u64>,
    record: CommitRecord,
}

impl FrontierEntry {
    fn key(&self) -> (i64, Reverse<u64>) {
        (self.timestamp, self.seq)
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
