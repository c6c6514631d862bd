//! Git references (branches, HEAD, tags, remotes)
//!
//! References are human-readable names pointing to commits. They can be:
//! - Direct: containing a commit SHA-1
//! - Symbolic: pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## Storage
//!
//! Loose refs are text files under `.git`, holding either a 40-character id or
//! `ref: <path>`. Refs that `git pack-refs` moved out of the tree live in
//! `.git/packed-refs`, one `<id> <name>` line each; `^<id>` lines after a tag record
//! what the tag peels to and are skipped. A loose ref shadows a packed one.
//!
//! ## Lookup
//!
//! A short name is tried in the same order git uses:
//! `<name>`, `refs/<name>`, `refs/tags/<name>`, `refs/heads/<name>`,
//! `refs/remotes/<name>`, `refs/remotes/<name>/HEAD`.

use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Symbolic refs pointing at symbolic refs are followed at most this many times
const MAX_SYMREF_DEPTH: usize = 5;

const PACKED_REFS_FILE: &str = "packed-refs";

/// Prefixes tried, in order, when resolving a short ref name
const SEARCH_PATTERNS: [&str; 6] = [
    "{}",
    "refs/{}",
    "refs/tags/{}",
    "refs/heads/{}",
    "refs/remotes/{}",
    "refs/remotes/{}/HEAD",
];

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(
                ObjectId::try_parse(content.to_string())
                    .with_context(|| format!("invalid ref file at {:?}", path))?,
            )))
        }
    }
}

impl Refs {
    /// The ref HEAD ultimately names, e.g. `refs/heads/main`, or `HEAD` itself when
    /// detached
    pub fn current_ref(&self, source: Option<SymRefName>) -> anyhow::Result<SymRefName> {
        let mut current = source.unwrap_or_else(|| SymRefName::new(HEAD_REF_NAME.to_string()));

        for _ in 0..MAX_SYMREF_DEPTH {
            let ref_content =
                SymRefOrOid::read_symref_or_oid(&self.path.join(current.as_ref_path()))?;

            match ref_content {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(SymRefOrOid::Oid(_)) | None => return Ok(current),
            }
        }

        Ok(current)
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_oid(&SymRefName::new(HEAD_REF_NAME.to_string()))
    }

    /// Resolve a short or full ref name; `None` when no candidate exists
    pub fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let packed = self.packed_refs()?;

        for pattern in SEARCH_PATTERNS {
            let candidate = SymRefName::new(pattern.replace("{}", name));
            let candidate_path = self.path.join(candidate.as_ref_path());

            if candidate_path.is_file() {
                trace!(name, candidate = candidate.as_ref_path(), "found loose ref");
                return self.read_oid_with(&candidate, &packed);
            }
            if let Some(oid) = packed.get(&candidate) {
                trace!(name, candidate = candidate.as_ref_path(), "found packed ref");
                return Ok(Some(oid.clone()));
            }
        }

        Ok(None)
    }

    /// Read the object id a full ref name points to, following symbolic refs
    pub fn read_oid(&self, sym_ref_name: &SymRefName) -> anyhow::Result<Option<ObjectId>> {
        self.read_oid_with(sym_ref_name, &self.packed_refs()?)
    }

    fn read_oid_with(
        &self,
        sym_ref_name: &SymRefName,
        packed: &BTreeMap<SymRefName, ObjectId>,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut current = sym_ref_name.clone();

        for _ in 0..MAX_SYMREF_DEPTH {
            let ref_content =
                SymRefOrOid::read_symref_or_oid(&self.path.join(current.as_ref_path()))?;

            match ref_content {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(SymRefOrOid::Oid(oid)) => return Ok(Some(oid)),
                None => return Ok(packed.get(&current).cloned()),
            }
        }

        anyhow::bail!("symbolic ref {} is nested too deeply", sym_ref_name.as_ref_path())
    }

    /// Refs recorded in `.git/packed-refs`; empty when the file does not exist
    pub fn packed_refs(&self) -> anyhow::Result<BTreeMap<SymRefName, ObjectId>> {
        let packed_path = self.path.join(PACKED_REFS_FILE);
        if !packed_path.is_file() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&packed_path)
            .with_context(|| format!("failed to read {:?}", packed_path))?;

        let mut refs = BTreeMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('^') {
                continue;
            }

            let (oid, name) = line
                .split_once(' ')
                .with_context(|| format!("malformed packed-refs line: {line}"))?;
            refs.insert(
                SymRefName::new(name.to_string()),
                ObjectId::try_parse(oid.to_string())?,
            );
        }

        Ok(refs)
    }

    /// Write `raw_ref` to the ref file at `path`, creating parent directories
    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;
        lock.deref_mut().write_all(b"\n")?;

        Ok(())
    }

    /// Point the full ref name `name` (e.g. `refs/heads/main`) at `oid`
    pub fn update_ref(&self, name: &SymRefName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(
            self.path.join(name.as_ref_path()).into_boxed_path(),
            oid.as_ref().to_string(),
        )
    }

    pub fn set_head_symref(&self, target: &SymRefName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("ref: {}", target.as_ref_path()))
    }

    fn list_refs(&self, path: &Path) -> anyhow::Result<Vec<SymRefName>> {
        Ok(WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                if entry.path().is_file() {
                    let relative_path = entry.path().strip_prefix(self.path.as_ref()).ok()?;
                    Some(SymRefName::new(
                        relative_path.to_string_lossy().replace('\\', "/"),
                    ))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>())
    }

    /// All refs pointing at each commit, used for `--decorate`
    pub fn reverse_refs(&self) -> anyhow::Result<HashMap<ObjectId, Vec<SymRefName>>> {
        let packed = self.packed_refs()?;

        let mut names = self.list_refs(self.refs_path().as_ref())?;
        names.extend(packed.keys().cloned());
        names.sort();
        names.dedup();
        names.push(SymRefName::new(HEAD_REF_NAME.to_string()));

        Ok(names
            .into_iter()
            .fold(HashMap::new(), |mut acc, sym_ref| {
                if let Ok(Some(oid)) = self.read_oid_with(&sym_ref, &packed) {
                    acc.entry(oid).or_insert_with(Vec::new).push(sym_ref);
                }
                acc
            }))
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }
}
