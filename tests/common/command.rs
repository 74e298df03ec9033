use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with one commit holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_kit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    kit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_kit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("Failed to find kit binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("KIT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn kit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_kit_command(dir, &["commit", "-m", message]);
    cmd.env("KIT_COMMIT_DATE", COMMIT_DATE); // %Y-%m-%d %H:%M:%S %z
    cmd
}

/// Stage everything and commit, returning the new head
pub fn add_and_commit(dir: &Path, message: &str) -> String {
    run_kit_command(dir, &["add", "."]).assert().success();
    kit_commit(dir, message).assert().success();

    crate::common::repository::head_commit(dir).expect("Commit did not move head")
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run kit");
    String::from_utf8(output.stdout).expect("kit printed invalid UTF-8")
}
