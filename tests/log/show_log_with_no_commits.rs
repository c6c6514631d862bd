use crate::common::command::{repository_dir, run_bitlog_command};
use crate::common::history::HistoryBuilder;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn show_log_with_no_commits(repository_dir: TempDir) {
    let builder = HistoryBuilder::new(repository_dir);

    run_bitlog_command(builder.path(), &["log"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown revision"));
}
