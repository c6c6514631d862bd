use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::log::file_history::{FileHistoryOptions, HistoryFlags, HistoryEntry};
use crate::artifacts::log::rev_list::{CommitRecord, RevListOptions};
use crate::{CommitDecoration, CommitDisplayFormat};
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub revision: String,
    pub max_count: Option<usize>,
    pub since: Option<i64>,
    pub oneline: bool,
    pub abbrev_commit: bool,
    pub format: CommitDisplayFormat,
    pub decorate: CommitDecoration,
    /// Show the history of this path instead of every commit
    pub path: Option<String>,
    pub follow: bool,
    pub force: bool,
}

impl LogOptions {
    fn history_flags(&self) -> HistoryFlags {
        let mut flags = HistoryFlags::empty();
        flags.set(HistoryFlags::FOLLOW, self.follow);
        flags.set(HistoryFlags::FORCE, self.force);
        flags
    }

    fn effective_format(&self) -> CommitDisplayFormat {
        if self.oneline {
            CommitDisplayFormat::OneLine
        } else {
            self.format
        }
    }
}

impl Repository {
    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        self.set_reverse_refs(self.refs().reverse_refs()?);
        self.set_current_ref(self.refs().current_ref(None)?);

        match &opts.path {
            None => {
                let walk_options = RevListOptions {
                    depth: opts.max_count,
                    since: opts.since,
                };

                for (index, record) in self.rev_list(&opts.revision, walk_options)?.enumerate() {
                    self.display_commit(index, &record?, None, opts)?;
                }
            }
            Some(path) => {
                let history_options = FileHistoryOptions {
                    path: path.clone(),
                    depth: opts.max_count,
                    since: opts.since,
                    flags: opts.history_flags(),
                };

                let entries = self.file_history(&opts.revision, history_options)?;
                debug!(path, entries = entries.len(), "file history collected");

                for (index, entry) in entries.iter().enumerate() {
                    self.display_commit(index, &entry.commit, Some(entry), opts)?;
                }
            }
        }

        self.writer().flush()?;
        Ok(())
    }

    /// Print one commit; `index` is its position in the output
    pub fn display_commit(
        &self,
        index: usize,
        record: &CommitRecord,
        entry: Option<&HistoryEntry>,
        opts: &LogOptions,
    ) -> anyhow::Result<()> {
        match opts.effective_format() {
            CommitDisplayFormat::Medium => {
                if index > 0 {
                    writeln!(self.writer())?;
                }
                self.show_commit_medium(record, entry, opts.abbrev_commit, opts.decorate)
            }
            CommitDisplayFormat::OneLine => {
                // --oneline implies --abbrev-commit, an explicit --format does not
                let abbrev_commit = opts.oneline || opts.abbrev_commit;
                self.show_commit_oneline(record, abbrev_commit, opts.decorate)
            }
        }
    }

    fn show_commit_medium(
        &self,
        record: &CommitRecord,
        entry: Option<&HistoryEntry>,
        abbrev_commit: bool,
        decoration: CommitDecoration,
    ) -> anyhow::Result<()> {
        let commit = &record.commit;

        writeln!(
            self.writer(),
            "commit {}{}",
            Self::abbrev_commit_id(record, abbrev_commit),
            self.commit_decoration(record, decoration)
        )?;
        if commit.parents().len() > 1 {
            let parents = commit
                .parents()
                .iter()
                .map(|parent| parent.to_short_oid())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {parents}")?;
        }
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        if let Some(entry) = entry {
            writeln!(self.writer(), "File:   {}", entry.path)?;
        }
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(
        &self,
        record: &CommitRecord,
        abbrev_commit: bool,
        decoration: CommitDecoration,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}{} {}",
            Self::abbrev_commit_id(record, abbrev_commit),
            self.commit_decoration(record, decoration),
            record.commit.short_message()
        )?;

        Ok(())
    }

    fn commit_decoration(&self, record: &CommitRecord, decoration: CommitDecoration) -> String {
        if decoration == CommitDecoration::None {
            return String::new();
        }

        let Some(ref_names) = self.reverse_refs().get(&record.oid).cloned() else {
            return String::new();
        };

        // HEAD is folded into "HEAD -> branch" unless it is detached
        let current_ref = self.current_ref().clone();
        let (head, refs): (Vec<_>, Vec<_>) = ref_names.into_iter().partition(|ref_name| {
            ref_name.is_detached_head() && !current_ref.is_detached_head()
        });

        let names = refs
            .into_iter()
            .map(|ref_name| {
                Self::ref_decoration_name(head.first(), &current_ref, ref_name, decoration)
            })
            .collect::<Vec<_>>();

        if names.is_empty() {
            String::new()
        } else {
            format!(" ({})", names.join(", "))
        }
    }

    fn ref_decoration_name(
        head: Option<&SymRefName>,
        current_ref: &SymRefName,
        ref_name: SymRefName,
        decoration: CommitDecoration,
    ) -> String {
        let name = match decoration {
            CommitDecoration::Full => ref_name.to_full_name(),
            CommitDecoration::Short | CommitDecoration::None => ref_name.to_short_name(),
        };
        let name = ref_name.to_colored_name(name);

        if let Some(head) = head
            && ref_name == *current_ref
        {
            return format!("{} {name}", head.to_colored_name(format!("{} ->", head.as_ref_path())));
        }

        name
    }

    fn abbrev_commit_id(record: &CommitRecord, abbrev_commit: bool) -> String {
        if abbrev_commit {
            record.oid.to_short_oid()
        } else {
            record.oid.as_ref().to_string()
        }
    }
}
