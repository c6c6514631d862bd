//! History of a single path across the commit graph
//!
//! The tracker drives [`RevList`] newest-first, resolves the tracked path in every
//! commit's snapshot and records the commits where the content id changes. A run of
//! commits sharing one content id is a *streak*; it is reported once, at its oldest
//! commit, which is where that content was introduced.
//!
//! When the path stops existing while walking back, `FOLLOW` looks the last known
//! content id up in the older snapshot. A single hit is a rename: the tracker keeps
//! going under the old name. Several hits are narrowed down by discarding paths that
//! already held the content in the newer snapshot; if that still leaves no single
//! candidate the lineage is ambiguous and the traversal ends.

use crate::artifacts::log::path_lookup::{find_content, normalize_path, resolve_path};
use crate::artifacts::log::rev_list::{CommitRecord, RevList, RevListOptions};
use crate::artifacts::log::{HistoryError, HistoryStore};
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use derive_new::new;
use tracing::debug;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HistoryFlags: u8 {
        /// A path that never existed yields an empty history instead of an error
        const FORCE = 0b01;
        /// Follow the content across renames
        const FOLLOW = 0b10;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHistoryOptions {
    pub path: String,
    /// Maximum number of entries to report
    pub depth: Option<usize>,
    /// Exclusive lower bound on committer time, in unix seconds
    pub since: Option<i64>,
    pub flags: HistoryFlags,
}

impl FileHistoryOptions {
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_flags(mut self, flags: HistoryFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// A commit that introduced a version of the tracked content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct HistoryEntry {
    /// Content id of the path in `commit`
    pub oid: ObjectId,
    /// Where the content lived in `commit`; differs from the requested path past a rename
    pub path: String,
    pub commit: CommitRecord,
}

pub struct FileHistory<'s, S: HistoryStore + ?Sized> {
    store: &'s S,
    start: ObjectId,
    options: FileHistoryOptions,
}

enum Flow {
    Continue,
    Stop,
}

enum RenameSearch {
    Nowhere,
    Renamed(String),
    Ambiguous(Vec<String>),
}

impl<'s, S: HistoryStore + ?Sized> FileHistory<'s, S> {
    pub fn new(store: &'s S, start: ObjectId, options: FileHistoryOptions) -> Self {
        Self {
            store,
            start,
            options,
        }
    }

    /// Walk the history and return the entries newest-first
    pub fn collect(self) -> anyhow::Result<Vec<HistoryEntry>> {
        if self.options.depth == Some(0) {
            return Ok(Vec::new());
        }

        let mut lineage = Lineage::new(normalize_path(&self.options.path));
        let walk_options = RevListOptions {
            depth: None,
            since: self.options.since,
        };

        for record in RevList::new(self.store, self.start.clone(), walk_options).into_iter()? {
            if let Flow::Stop = self.visit(&mut lineage, record?)? {
                return Ok(lineage.entries);
            }

            if self
                .options
                .depth
                .is_some_and(|depth| lineage.entries.len() >= depth)
            {
                debug!(path = %lineage.path, "history depth reached");
                return Ok(lineage.entries);
            }
        }

        lineage.close_streak();
        Ok(lineage.entries)
    }

    fn visit(&self, lineage: &mut Lineage, record: CommitRecord) -> anyhow::Result<Flow> {
        let tree_oid = record.commit.tree_oid();

        if let Some(oid) = resolve_path(self.store, tree_oid, &lineage.path)? {
            let unchanged = lineage.is_ok
                && lineage
                    .last
                    .as_ref()
                    .is_some_and(|observed| observed.oid == oid);

            if !unchanged {
                lineage.close_streak();
                lineage.last = Some(Observed::new(oid, lineage.path.clone()));
            }
            lineage.last_commit = Some(record);
            lineage.is_ok = true;
            return Ok(Flow::Continue);
        }

        let follow = self.options.flags.contains(HistoryFlags::FOLLOW);
        let force = self.options.flags.contains(HistoryFlags::FORCE);

        if follow && let Some(last) = lineage.last.clone() {
            match self.search_renamed(lineage, tree_oid, &last.oid)? {
                RenameSearch::Renamed(path) => {
                    debug!(
                        commit = %record.oid,
                        from = %lineage.path,
                        to = %path,
                        "following rename"
                    );
                    lineage.close_streak();
                    lineage.path = path.clone();
                    lineage.last = Some(Observed::new(last.oid, path));
                    lineage.last_commit = Some(record);
                    lineage.is_ok = true;
                    return Ok(Flow::Continue);
                }
                RenameSearch::Ambiguous(candidates) => {
                    debug!(
                        commit = %record.oid,
                        path = %lineage.path,
                        ?candidates,
                        "ambiguous rename, not following further"
                    );
                    lineage.close_streak();
                    return Ok(Flow::Stop);
                }
                RenameSearch::Nowhere => {}
            }
        }

        if !force && !follow {
            return Err(HistoryError::PathNotFound {
                path: lineage.path.clone(),
                commit: record.oid,
            }
            .into());
        }

        lineage.close_streak();
        lineage.last_commit = Some(record);
        Ok(Flow::Continue)
    }

    fn search_renamed(
        &self,
        lineage: &Lineage,
        tree_oid: &ObjectId,
        content: &ObjectId,
    ) -> anyhow::Result<RenameSearch> {
        let mut candidates = find_content(self.store, tree_oid, content)?;

        match candidates.len() {
            0 => return Ok(RenameSearch::Nowhere),
            1 => return Ok(RenameSearch::Renamed(candidates.remove(0))),
            _ => {}
        }

        // paths already holding the content in the newer snapshot are copies, not the source
        let known = match &lineage.last_commit {
            Some(newer) => find_content(self.store, newer.commit.tree_oid(), content)?,
            None => Vec::new(),
        };
        candidates.retain(|candidate| !known.contains(candidate));

        if candidates.len() == 1 {
            Ok(RenameSearch::Renamed(candidates.remove(0)))
        } else {
            Ok(RenameSearch::Ambiguous(candidates))
        }
    }
}

#[derive(Debug, Clone, new)]
struct Observed {
    oid: ObjectId,
    path: String,
}

/// Tracking state for one logical file
struct Lineage {
    /// Path the file is looked up under; changes when a rename is followed
    path: String,
    last: Option<Observed>,
    last_commit: Option<CommitRecord>,
    /// Whether `last` and `last_commit` form an open streak that can be reported
    is_ok: bool,
    entries: Vec<HistoryEntry>,
}

impl Lineage {
    fn new(path: String) -> Self {
        Self {
            path,
            last: None,
            last_commit: None,
            is_ok: false,
            entries: Vec::new(),
        }
    }

    fn close_streak(&mut self) {
        if self.is_ok
            && let (Some(last), Some(commit)) = (&self.last, &self.last_commit)
        {
            debug!(commit = %commit.oid, path = %last.path, content = %last.oid, "file changed");
            self.entries.push(HistoryEntry::new(
                last.oid.clone(),
                last.path.clone(),
                commit.clone(),
            ));
        }
        self.is_ok = false;
    }
}
