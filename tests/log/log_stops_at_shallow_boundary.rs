use crate::common::command::run_bitlog_command;
use crate::common::history::{LinearHistory, linear_history};
use crate::common::oneline_subjects;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_stops_at_shallow_boundary(
    linear_history: LinearHistory,
) -> Result<(), Box<dyn std::error::Error>> {
    let [first, second, _] = &linear_history.commits[..] else {
        panic!("expected three commits");
    };
    linear_history.builder.mark_shallow(std::slice::from_ref(second));
    // a shallow clone does not hold the commits past the boundary
    std::fs::remove_file(
        linear_history
            .path()
            .join(".git/objects")
            .join(first.to_path()),
    )?;

    let output = run_bitlog_command(
        linear_history.path(),
        &["log", "--oneline", "--decorate=none"],
    )
    .assert()
    .success();

    assert_eq!(
        oneline_subjects(&output.get_output().stdout),
        vec!["Third commit", "Second commit"]
    );

    Ok(())
}
