//! The shallow boundary of a repository
//!
//! `git clone --depth` records in `.git/shallow` every commit whose parents were not
//! fetched, one id per line. History walks treat those commits as roots.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, new)]
pub struct ShallowFile {
    path: Box<Path>,
}

impl ShallowFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ids listed in the file; a missing file means a full clone
    pub fn read(&self) -> anyhow::Result<HashSet<ObjectId>> {
        if !self.path.exists() {
            return Ok(HashSet::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read shallow file {}", self.path.display()))?;

        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                ObjectId::try_parse(line.to_string())
                    .with_context(|| format!("Invalid entry in {}", self.path.display()))
            })
            .collect()
    }

    pub fn write(&self, oids: &[ObjectId]) -> anyhow::Result<()> {
        let content = oids
            .iter()
            .map(|oid| format!("{oid}\n"))
            .collect::<String>();

        std::fs::write(&self.path, content)
            .with_context(|| format!("Unable to write shallow file {}", self.path.display()))
    }
}
