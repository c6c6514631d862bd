use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::shallow::ShallowFile;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::HistoryStore;
use crate::artifacts::log::file_history::{FileHistory, FileHistoryOptions, HistoryEntry};
use crate::artifacts::log::rev_list::{RevList, RevListIntoIter, RevListOptions};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

const GIT_DIR_NAME: &str = ".git";
const DEFAULT_BRANCH: &str = "refs/heads/main";

pub struct Repository {
    git_path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
    shallow: ShallowFile,
    current_ref: RefCell<SymRefName>,
    reverse_refs: RefCell<HashMap<ObjectId, Vec<SymRefName>>>,
}

impl Repository {
    /// Open the repository whose git directory is `git_path`
    pub fn open(git_path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let git_path = git_path
            .canonicalize()
            .with_context(|| format!("not a git repository: {}", git_path.display()))?;

        if !Self::is_git_dir(&git_path) {
            anyhow::bail!("not a git repository: {}", git_path.display());
        }

        debug!(git_dir = %git_path.display(), "opening repository");

        let database = Database::new(git_path.join("objects").into_boxed_path());
        let refs = Refs::new(git_path.clone().into_boxed_path());
        let shallow = ShallowFile::new(git_path.join("shallow").into_boxed_path());

        Ok(Repository {
            git_path: git_path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            refs,
            shallow,
            current_ref: RefCell::new(SymRefName::default()),
            reverse_refs: RefCell::new(HashMap::new()),
        })
    }

    /// Open the repository containing `start`, searching parent directories
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let git_path = Self::find_git_dir(start)?;
        Self::open(&git_path, writer)
    }

    /// Lay out an empty repository in `path/.git` with HEAD on `main`
    pub fn create(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let git_path = path.join(GIT_DIR_NAME);

        for dir in ["objects", "refs/heads", "refs/tags"] {
            std::fs::create_dir_all(git_path.join(dir))
                .with_context(|| format!("Unable to create {}", git_path.join(dir).display()))?;
        }

        let refs = Refs::new(git_path.clone().into_boxed_path());
        refs.set_head_symref(&SymRefName::new(DEFAULT_BRANCH.to_string()))?;

        Self::open(&git_path, writer)
    }

    fn find_git_dir(start: &Path) -> anyhow::Result<PathBuf> {
        let start = start
            .canonicalize()
            .with_context(|| format!("Unable to access {}", start.display()))?;

        start
            .ancestors()
            .find_map(|dir| {
                let dot_git = dir.join(GIT_DIR_NAME);
                if Self::is_git_dir(&dot_git) {
                    Some(dot_git)
                } else if Self::is_git_dir(dir) {
                    // bare repository
                    Some(dir.to_path_buf())
                } else {
                    None
                }
            })
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "not a git repository (or any of the parent directories): {}",
                    start.display()
                )
            })
    }

    fn is_git_dir(path: &Path) -> bool {
        path.join("HEAD").is_file() && path.join("objects").is_dir()
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn shallow(&self) -> &ShallowFile {
        &self.shallow
    }

    pub fn current_ref(&self) -> Ref<'_, SymRefName> {
        self.current_ref.borrow()
    }

    pub fn set_current_ref(&self, new_ref: SymRefName) {
        *self.current_ref.borrow_mut() = new_ref;
    }

    pub fn reverse_refs(&self) -> Ref<'_, HashMap<ObjectId, Vec<SymRefName>>> {
        self.reverse_refs.borrow()
    }

    pub fn set_reverse_refs(&self, new_reverse_refs: HashMap<ObjectId, Vec<SymRefName>>) {
        *self.reverse_refs.borrow_mut() = new_reverse_refs;
    }

    pub fn resolve_revision(&self, revision: &str) -> anyhow::Result<ObjectId> {
        Revision::try_parse(revision)?.resolve(self)
    }

    /// Commits reachable from `revision`, newest first
    pub fn rev_list(
        &self,
        revision: &str,
        options: RevListOptions,
    ) -> anyhow::Result<RevListIntoIter<'_, Self>> {
        let start = self.resolve_revision(revision)?;
        RevList::new(self, start, options).into_iter()
    }

    /// Commits at which the content of `options.path` changed, newest first
    pub fn file_history(
        &self,
        revision: &str,
        options: FileHistoryOptions,
    ) -> anyhow::Result<Vec<HistoryEntry>> {
        let start = self.resolve_revision(revision)?;
        FileHistory::new(self, start, options).collect()
    }
}

impl HistoryStore for Repository {
    fn read_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database.parse_object_as_commit(oid)
    }

    fn read_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        self.database.parse_object_as_tree(oid)
    }

    fn read_shallow_boundary(&self) -> anyhow::Result<HashSet<ObjectId>> {
        self.shallow.read()
    }
}
