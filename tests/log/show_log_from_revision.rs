use crate::common::command::run_bitlog_command;
use crate::common::history::{LinearHistory, linear_history};
use crate::common::oneline_subjects;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("HEAD", vec!["Third commit", "Second commit", "First commit"])]
#[case("main", vec!["Third commit", "Second commit", "First commit"])]
#[case("refs/heads/main", vec!["Third commit", "Second commit", "First commit"])]
#[case("@", vec!["Third commit", "Second commit", "First commit"])]
#[case("HEAD^", vec!["Second commit", "First commit"])]
#[case("main~2", vec!["First commit"])]
#[case("HEAD~1^", vec!["First commit"])]
fn show_log_from_revision(
    linear_history: LinearHistory,
    #[case] revision: &str,
    #[case] expected: Vec<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitlog_command(
        linear_history.path(),
        &["log", revision, "--oneline", "--decorate=none"],
    )
    .assert()
    .success();

    assert_eq!(oneline_subjects(&output.get_output().stdout), expected);

    Ok(())
}

#[rstest]
fn show_log_from_specific_commit_sha(
    linear_history: LinearHistory,
) -> Result<(), Box<dyn std::error::Error>> {
    let second = linear_history.commits[1].to_string();

    let output = run_bitlog_command(
        linear_history.path(),
        &["log", &second, "--oneline", "--decorate=none"],
    )
    .assert()
    .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["Second commit", "First commit"]
    );

    Ok(())
}

#[rstest]
fn show_log_from_abbreviated_sha(
    linear_history: LinearHistory,
) -> Result<(), Box<dyn std::error::Error>> {
    let second = linear_history.commits[1].to_short_oid();

    let output = run_bitlog_command(
        linear_history.path(),
        &["log", &second, "--oneline", "--decorate=none"],
    )
    .assert()
    .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["Second commit", "First commit"]
    );

    Ok(())
}

#[rstest]
fn show_log_from_tag(linear_history: LinearHistory) -> Result<(), Box<dyn std::error::Error>> {
    linear_history
        .builder
        .tag("v0.1", &linear_history.commits[0]);

    let output = run_bitlog_command(
        linear_history.path(),
        &["log", "v0.1", "--oneline", "--decorate=none"],
    )
    .assert()
    .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["First commit"]
    );

    Ok(())
}

#[rstest]
#[case("nonexistent-branch")]
#[case("HEAD~5")]
#[case("deadbeef")]
fn show_log_from_invalid_revision(linear_history: LinearHistory, #[case] revision: &str) {
    run_bitlog_command(linear_history.path(), &["log", revision])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(format!(
            "ambiguous argument '{revision}'"
        )));
}
