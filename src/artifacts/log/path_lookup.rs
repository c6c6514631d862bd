//! Path ↔ content id lookups inside a snapshot
//!
//! `resolve_path` walks a slash-separated path down from a root tree.
//! `find_content` does the reverse: given a content id it lists every path of the
//! snapshot holding exactly that content, which is how a renamed file is found.

use crate::artifacts::log::HistoryStore;
use crate::artifacts::objects::object_id::ObjectId;
use tracing::trace;

/// Id of whatever `path` names inside the tree `root`, if anything
///
/// Empty components and `.` are ignored, so `""` names the root tree itself. A path
/// that tries to descend through a file resolves to nothing.
pub fn resolve_path<S: HistoryStore + ?Sized>(
    store: &S,
    root: &ObjectId,
    path: &str,
) -> anyhow::Result<Option<ObjectId>> {
    let mut current = root.clone();
    let mut is_tree = true;

    for component in path_components(path) {
        if !is_tree {
            return Ok(None);
        }

        let tree = store.read_tree(&current)?;
        match tree.get(component) {
            Some(entry) => {
                current = entry.oid.clone();
                is_tree = entry.is_tree();
            }
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

/// Every path under `root` whose entry id equals `oid`, in tree order
///
/// Entries of any kind match, so a directory whose tree is unchanged is found too.
/// Only directories are descended into.
pub fn find_content<S: HistoryStore + ?Sized>(
    store: &S,
    root: &ObjectId,
    oid: &ObjectId,
) -> anyhow::Result<Vec<String>> {
    let mut found = Vec::new();
    search_tree(store, root, "", oid, &mut found)?;

    trace!(content = %oid, matches = found.len(), "searched snapshot for content");
    Ok(found)
}

fn search_tree<S: HistoryStore + ?Sized>(
    store: &S,
    tree_oid: &ObjectId,
    prefix: &str,
    needle: &ObjectId,
    found: &mut Vec<String>,
) -> anyhow::Result<()> {
    let tree = store.read_tree(tree_oid)?;

    for (name, entry) in tree.entries() {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        if entry.oid == *needle {
            found.push(path.clone());
        }
        if entry.is_tree() {
            search_tree(store, &entry.oid, &path, needle, found)?;
        }
    }

    Ok(())
}

pub(crate) fn path_components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter(|component| !component.is_empty() && *component != ".")
}

/// `path` with empty and `.` components removed
pub fn normalize_path(path: &str) -> String {
    path_components(path).collect::<Vec<_>>().join("/")
}
