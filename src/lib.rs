//! bitlog: commit history and rename-following file history over a git repository
//!
//! - `areas`: the on-disk repository (loose objects, refs, shallow boundary)
//! - `artifacts`: object model, revision parsing and the history queries
//! - `commands`: the `log` and `rev-list` commands built on top of them
//!
//! The history queries only need [`artifacts::log::HistoryStore`], so they run just as
//! well over an in-memory store as over a repository on disk.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod logging;

/// How `log` prints each commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CommitDisplayFormat {
    #[default]
    Medium,
    #[value(name = "oneline")]
    OneLine,
}

/// Which ref names `log` prints next to commit ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CommitDecoration {
    #[default]
    Short,
    Full,
    None,
}
