use crate::common::command::run_bitlog_command;
use crate::common::history::{LinearHistory, linear_history};
use crate::common::oneline_subjects;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("1", vec!["Third commit"])]
#[case("2", vec!["Third commit", "Second commit"])]
#[case("10", vec!["Third commit", "Second commit", "First commit"])]
#[case("0", vec![])]
fn log_with_max_count(
    linear_history: LinearHistory,
    #[case] max_count: &str,
    #[case] expected: Vec<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        linear_history.path(),
        &["log", "-n", max_count, "--oneline", "--decorate=none"],
    )
    .assert()
    .success();

    assert_eq!(oneline_subjects(&output.get_output().stdout), expected);

    Ok(())
}

#[rstest]
fn max_count_stops_before_a_missing_parent(
    linear_history: LinearHistory,
) -> Result<(), Box<dyn std::error::Error>> {
    // dropping the first commit's object only matters once the walk reaches it
    let first = &linear_history.commits[0];
    let object_path = linear_history
        .path()
        .join(".git/objects")
        .join(first.to_path());
    std::fs::remove_file(object_path)?;

    let output = run_bitlog_command(
        linear_history.path(),
        &["log", "--max-count=2", "--oneline", "--decorate=none"],
    )
    .assert()
    .success();
    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["Third commit", "Second commit"]
    );

    run_bitlog_command(linear_history.path(), &["log", "--oneline"])
        .assert()
        .failure()
        .stderr(predicates::str::contains(format!("object {first} not found")));

    Ok(())
}
