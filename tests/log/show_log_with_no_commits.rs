use crate::common::command::{repository_dir, run_kit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn show_log_with_no_commits(repository_dir: TempDir) {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::diff("No commits to display\n"));
}
