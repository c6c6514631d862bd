/// Commits sharing a timestamp are listed in the order they were discovered: the
/// first parent of a merge before the second.
use crate::common::command::{repository_dir, run_bitlog_command};
use crate::common::history::HistoryBuilder;
use crate::common::oneline_subjects;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(false, vec!["M", "B", "C", "A"])]
#[case(true, vec!["M", "C", "B", "A"])]
fn log_with_identical_timestamps_maintains_stable_order(
    repository_dir: TempDir,
    #[case] swap_parents: bool,
    #[case] expected: Vec<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = HistoryBuilder::new(repository_dir);

    let a = builder.commit(&[], &[("a.txt", "a")], "A", "2024-01-01 10:00:00 +0000");
    let b = builder.commit(&[&a], &[("a.txt", "b")], "B", "2024-01-01 11:00:00 +0000");
    let c = builder.commit(&[&a], &[("a.txt", "c")], "C", "2024-01-01 11:00:00 +0000");
    let parents = if swap_parents { [&c, &b] } else { [&b, &c] };
    let m = builder.commit(&parents, &[("a.txt", "m")], "M", "2024-01-01 12:00:00 +0000");
    builder.branch("main", &m);

    let output = run_bitlog_command(builder.path(), &["log", "--oneline", "--decorate=none"])
        .assert()
        .success();

    assert_eq!(oneline_subjects(&output.get_output().stdout), expected);

    Ok(())
}
