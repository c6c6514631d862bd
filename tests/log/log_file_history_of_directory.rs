/// A directory's history is the history of its tree id: any change below it counts.
use crate::common::command::{repository_dir, run_bitlog_command};
use crate::common::history::HistoryBuilder;
use crate::common::oneline_subjects;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_file_history_of_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = HistoryBuilder::new(repository_dir);

    let c1 = builder.commit(
        &[],
        &[("docs/intro.md", "intro"), ("main.rs", "fn main() {}")],
        "add docs",
        "2024-01-01 10:00:00 +0000",
    );
    let c2 = builder.commit(
        &[&c1],
        &[("docs/intro.md", "intro"), ("main.rs", "fn main() { run() }")],
        "edit main",
        "2024-01-01 11:00:00 +0000",
    );
    let c3 = builder.commit(
        &[&c2],
        &[
            ("docs/intro.md", "intro"),
            ("docs/usage/cli.md", "usage"),
            ("main.rs", "fn main() { run() }"),
        ],
        "add usage docs",
        "2024-01-01 12:00:00 +0000",
    );
    builder.branch("main", &c3);

    let output = run_bitlog_command(
        builder.path(),
        &["log", "--oneline", "--decorate=none", "--", "docs"],
    )
    .assert()
    .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["add usage docs", "add docs"]
    );

    Ok(())
}
