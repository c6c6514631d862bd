use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevListOptions;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct RevListCommandOptions {
    pub revision: String,
    pub max_count: Option<usize>,
    pub since: Option<i64>,
}

impl Repository {
    /// Print the id of every commit reachable from the revision, newest first
    pub fn print_rev_list(&self, opts: &RevListCommandOptions) -> anyhow::Result<()> {
        let walk_options = RevListOptions {
            depth: opts.max_count,
            since: opts.since,
        };

        for record in self.rev_list(&opts.revision, walk_options)? {
            writeln!(self.writer(), "{}", record?.oid)?;
        }

        self.writer().flush()?;
        Ok(())
    }
}
