/// Two branches committed in alternation are interleaved by commit time, newest first.
use crate::common::command::{repository_dir, run_bitlog_command};
use crate::common::history::HistoryBuilder;
use crate::common::oneline_subjects;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_multiple_branches_with_timestamp_ordering(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = HistoryBuilder::new(repository_dir);

    let root = builder.commit(&[], &[("a.txt", "0")], "root", "2024-01-01 09:00:00 +0000");
    let left1 = builder.commit(&[&root], &[("a.txt", "l1")], "left 1", "2024-01-01 10:00:00 +0000");
    let right1 =
        builder.commit(&[&root], &[("a.txt", "r1")], "right 1", "2024-01-01 11:00:00 +0000");
    let left2 =
        builder.commit(&[&left1], &[("a.txt", "l2")], "left 2", "2024-01-01 12:00:00 +0000");
    let right2 =
        builder.commit(&[&right1], &[("a.txt", "r2")], "right 2", "2024-01-01 13:00:00 +0000");
    let merge = builder.commit(
        &[&left2, &right2],
        &[("a.txt", "m")],
        "merge",
        "2024-01-01 14:00:00 +0000",
    );
    builder.branch("main", &merge);

    let output = run_bitlog_command(builder.path(), &["log", "--oneline", "--decorate=none"])
        .assert()
        .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["merge", "right 2", "left 2", "right 1", "left 1", "root"]
    );

    Ok(())
}

#[rstest]
fn log_orders_by_commit_time_not_offset(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = HistoryBuilder::new(repository_dir);

    // 10:00 +0200 is 08:00 UTC, older than 09:00 +0000
    let root = builder.commit(&[], &[("a.txt", "0")], "root", "2024-01-01 07:00:00 +0000");
    let east = builder.commit(&[&root], &[("a.txt", "e")], "east", "2024-01-01 10:00:00 +0200");
    let west = builder.commit(&[&root], &[("a.txt", "w")], "west", "2024-01-01 09:00:00 +0000");
    let merge = builder.commit(
        &[&east, &west],
        &[("a.txt", "m")],
        "merge",
        "2024-01-01 12:00:00 +0000",
    );
    builder.branch("main", &merge);

    let output = run_bitlog_command(builder.path(), &["log", "--oneline", "--decorate=none"])
        .assert()
        .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["merge", "west", "east", "root"]
    );

    Ok(())
}
