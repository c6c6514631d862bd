use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

pub fn run_bitlog_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitlog").expect("Failed to find bitlog binary");
    cmd.envs(vec![("NO_PAGER", "1")])
        .env_remove("GIT_DIR")
        .env_remove("BITLOG_LOG")
        .current_dir(dir)
        .args(args);
    cmd
}
