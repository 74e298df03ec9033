use crate::common::command::{init_repository_dir, run_kit_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use crate::common::repository::{index_lines, stored_objects};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn adding_twice_stages_once(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "one, edited".to_string()));

    run_kit_command(dir, &["add", "1.txt"]).assert().success();
    let index_after_first_add = index_lines(dir);
    let objects_after_first_add = stored_objects(dir);

    run_kit_command(dir, &["add", "1.txt"]).assert().success();

    assert_eq!(index_lines(dir), index_after_first_add);
    assert_eq!(stored_objects(dir), objects_after_first_add);
}

#[rstest]
fn adding_committed_content_stages_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_kit_command(dir, &["add", "."]).assert().success();

    assert_eq!(stdout_of(&mut run_kit_command(dir, &["status", "--porcelain"])), "");
    run_kit_command(dir, &["commit", "-m", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Please add files first to commit\n"));
}
