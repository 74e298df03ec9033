use crate::common::command::{kit_commit, repository_dir, run_kit_command};
use crate::common::file::{FileSpec, write_file};
use crate::common::repository::head_commit;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_without_staged_files_is_reported(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("untracked.txt"), "u".to_string()));

    kit_commit(dir, "nothing to see")
        .assert()
        .success()
        .stdout(predicate::str::diff("Please add files first to commit\n"));

    assert!(head_commit(dir).is_none());
}
