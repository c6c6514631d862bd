/// a.txt is renamed to b.txt in C2 without changing content, then edited in C3.
use crate::common::command::{repository_dir, run_bitlog_command};
use crate::common::history::HistoryBuilder;
use crate::common::oneline_subjects;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[fixture]
fn renamed_file(repository_dir: TempDir) -> HistoryBuilder {
    let builder = HistoryBuilder::new(repository_dir);

    let c1 = builder.commit(
        &[],
        &[("a.txt", "hello\n"), ("keep.txt", "keep\n")],
        "add a",
        "2024-01-01 10:00:00 +0000",
    );
    let c2 = builder.commit(
        &[&c1],
        &[("b.txt", "hello\n"), ("keep.txt", "keep\n")],
        "rename a to b",
        "2024-01-01 11:00:00 +0000",
    );
    let c3 = builder.commit(
        &[&c2],
        &[("b.txt", "hello world\n"), ("keep.txt", "keep\n")],
        "edit b",
        "2024-01-01 12:00:00 +0000",
    );
    builder.branch("main", &c3);

    builder
}

#[rstest]
fn log_file_history_with_follow(
    renamed_file: HistoryBuilder,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        renamed_file.path(),
        &["log", "--follow", "--oneline", "--decorate=none", "--", "b.txt"],
    )
    .assert()
    .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["edit b", "rename a to b", "add a"]
    );

    Ok(())
}

#[rstest]
fn follow_reports_the_old_name(
    renamed_file: HistoryBuilder,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        renamed_file.path(),
        &["log", "--follow", "--decorate=none", "--", "b.txt"],
    )
    .assert()
    .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    let file_lines = stdout
        .lines()
        .filter(|line| line.starts_with("File:"))
        .collect::<Vec<_>>();
    assert_eq!(
        file_lines,
        vec!["File:   b.txt", "File:   b.txt", "File:   a.txt"]
    );

    Ok(())
}

#[rstest]
fn without_follow_the_rename_is_not_found(renamed_file: HistoryBuilder) {
    run_bitlog_command(renamed_file.path(), &["log", "--", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not find file or directory 'b.txt'",
        ));
}

#[rstest]
fn forced_history_starts_at_the_rename(
    renamed_file: HistoryBuilder,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        renamed_file.path(),
        &["log", "--force", "--oneline", "--decorate=none", "--", "b.txt"],
    )
    .assert()
    .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["edit b", "rename a to b"]
    );

    Ok(())
}

#[rstest]
fn follow_requires_a_path(renamed_file: HistoryBuilder) {
    run_bitlog_command(renamed_file.path(), &["log", "--follow"])
        .assert()
        .failure();
}
