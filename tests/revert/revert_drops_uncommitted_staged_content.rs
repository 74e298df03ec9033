use crate::common::command::{add_and_commit, repository_dir, run_kit_command};
use crate::common::file::{FileSpec, write_file};
use crate::common::repository::{reachable_objects, stored_objects};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn revert_drops_uncommitted_staged_content(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("x.txt"), "1".to_string()));
    let first = add_and_commit(dir, "first");
    write_file(FileSpec::new(dir.join("x.txt"), "2".to_string()));
    add_and_commit(dir, "second");

    write_file(FileSpec::new(dir.join("pending.txt"), "never committed".to_string()));
    write_file(FileSpec::new(dir.join("x.txt"), "1".to_string()));
    run_kit_command(dir, &["add", "."]).assert().success();

    run_kit_command(dir, &["revert", &first]).assert().success();

    assert_eq!(stored_objects(dir), reachable_objects(dir, &first));
    assert!(!dir.join("pending.txt").exists());
}
