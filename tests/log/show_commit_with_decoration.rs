use crate::common::command::run_bitlog_command;
use crate::common::history::{LinearHistory, linear_history};
use crate::common::output_lines;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("short", "(HEAD -> main, tag: v1.0)", "(feature)")]
#[case("full", "(HEAD -> refs/heads/main, tag: refs/tags/v1.0)", "(refs/heads/feature)")]
fn show_commit_with_decoration(
    linear_history: LinearHistory,
    #[case] decorate: &str,
    #[case] head_decoration: &str,
    #[case] feature_decoration: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let [first, second, third] = &linear_history.commits[..] else {
        panic!("expected three commits");
    };
    linear_history.builder.tag("v1.0", third);
    linear_history.builder.branch("feature", second);

    let output = run_bitlog_command(
        linear_history.path(),
        &["log", "--oneline", &format!("--decorate={decorate}")],
    )
    .assert()
    .success();

    assert_eq!(
        output_lines(&output.get_output().stdout),
        vec![
            format!("{} {head_decoration} Third commit", third.to_short_oid()),
            format!("{} {feature_decoration} Second commit", second.to_short_oid()),
            format!("{} First commit", first.to_short_oid()),
        ]
    );

    Ok(())
}

#[rstest]
fn show_commit_with_decoration_none(
    linear_history: LinearHistory,
) -> Result<(), Box<dyn std::error::Error>> {
    linear_history.builder.tag("v1.0", &linear_history.commits[2]);

    let output = run_bitlog_command(linear_history.path(), &["log", "--decorate=none"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert!(!stdout.contains('('), "unexpected decoration in:\n{stdout}");

    Ok(())
}

#[rstest]
fn show_detached_head_decoration(
    linear_history: LinearHistory,
) -> Result<(), Box<dyn std::error::Error>> {
    let second = &linear_history.commits[1];
    linear_history.builder.detach_head(second);

    let output = run_bitlog_command(linear_history.path(), &["log", "--oneline", "-n", "1"])
        .assert()
        .success();

    assert_eq!(
        output_lines(&output.get_output().stdout),
        vec![format!("{} (HEAD) Second commit", second.to_short_oid())]
    );

    Ok(())
}
