#![allow(dead_code)]

pub mod command;

const TMPDIR: &str = "../playground";

pub fn redirect_temp_dir() {
    unsafe {
        std::env::set_var("TMPDIR", TMPDIR);
    }

    // Ensure the TMPDIR exists
    if !std::path::Path::new(TMPDIR).exists() {
        std::fs::create_dir_all(TMPDIR).expect("Failed to create TMPDIR");
    }
}

/// Non-empty output lines, without trailing whitespace
pub fn output_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Commit subjects from `--oneline --decorate=none` output
pub fn oneline_subjects(stdout: &[u8]) -> Vec<String> {
    output_lines(stdout)
        .iter()
        .filter_map(|line| line.split_once(' ').map(|(_, subject)| subject.to_string()))
        .collect()
}
