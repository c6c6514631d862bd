/// a.txt is X in C1, untouched in C2 and rewritten to Y in C3: only C3 and C1 changed it.
use crate::common::command::{repository_dir, run_bitlog_command};
use crate::common::history::HistoryBuilder;
use crate::common::oneline_subjects;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[fixture]
fn edited_file(repository_dir: TempDir) -> HistoryBuilder {
    let builder = HistoryBuilder::new(repository_dir);

    let c1 = builder.commit(&[], &[("a.txt", "X")], "C1", "2024-01-01 10:00:00 +0000");
    let c2 = builder.commit(
        &[&c1],
        &[("a.txt", "X"), ("b.txt", "other")],
        "C2",
        "2024-01-01 11:00:00 +0000",
    );
    let c3 = builder.commit(
        &[&c2],
        &[("a.txt", "Y"), ("b.txt", "other")],
        "C3",
        "2024-01-01 12:00:00 +0000",
    );
    builder.branch("main", &c3);

    builder
}

#[rstest]
fn log_file_history_of_single_file(
    edited_file: HistoryBuilder,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        edited_file.path(),
        &["log", "--oneline", "--decorate=none", "--", "a.txt"],
    )
    .assert()
    .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["C3", "C1"]
    );

    Ok(())
}

#[rstest]
fn unchanged_file_lists_its_creation_commit(
    edited_file: HistoryBuilder,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        edited_file.path(),
        &["log", "--force", "--oneline", "--decorate=none", "--", "b.txt"],
    )
    .assert()
    .success();

    assert_eq!(oneline_subjects(&output.get_output().stdout), vec!["C2"]);

    Ok(())
}

#[rstest]
fn file_added_after_the_root_needs_force(edited_file: HistoryBuilder) {
    run_bitlog_command(edited_file.path(), &["log", "--", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not find file or directory 'b.txt'",
        ));
}

#[rstest]
fn medium_format_names_the_file(
    edited_file: HistoryBuilder,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        edited_file.path(),
        &["log", "--decorate=none", "--", "a.txt"],
    )
    .assert()
    .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    let file_lines = stdout
        .lines()
        .filter(|line| line.starts_with("File:"))
        .collect::<Vec<_>>();
    assert_eq!(file_lines, vec!["File:   a.txt", "File:   a.txt"]);

    Ok(())
}

#[rstest]
fn file_history_from_an_older_revision(
    edited_file: HistoryBuilder,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        edited_file.path(),
        &["log", "HEAD^", "--oneline", "--decorate=none", "--", "a.txt"],
    )
    .assert()
    .success();

    assert_eq!(oneline_subjects(&output.get_output().stdout), vec!["C1"]);

    Ok(())
}
