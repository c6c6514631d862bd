use crate::common::command::run_bitlog_command;
use crate::common::history::{LinearHistory, linear_history};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn log_file_history_unknown_path(linear_history: LinearHistory) {
    let head = linear_history.commits[2].to_string();

    run_bitlog_command(linear_history.path(), &["log", "--", "nope.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(format!(
            "could not find file or directory 'nope.txt' in commit {head}"
        )));
}

#[rstest]
fn forced_unknown_path_prints_nothing(linear_history: LinearHistory) {
    run_bitlog_command(linear_history.path(), &["log", "--force", "--", "nope.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[rstest]
fn path_added_after_the_start_commit_is_unknown(linear_history: LinearHistory) {
    run_bitlog_command(linear_history.path(), &["log", "HEAD~2", "--", "file3.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find file or directory"));
}
