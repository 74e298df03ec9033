use crate::common::command::{add_and_commit, repository_dir, run_kit_command, stdout_of};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::common::repository::{head_commit, index_lines, reachable_objects, stored_objects};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn revert_restores_the_working_tree(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("x.txt"), "hi".to_string()));
    let first = add_and_commit(dir, "first");
    let first_objects = reachable_objects(dir, &first);

    write_file(FileSpec::new(dir.join("x.txt"), "bye".to_string()));
    let second = add_and_commit(dir, "second");
    let second_only = reachable_objects(dir, &second)
        .difference(&first_objects)
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(second_only.len(), 3);

    run_kit_command(dir, &["revert", &first])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "HEAD is now at {} first\n",
            &first[..7]
        )));

    assert_eq!(read_file(&dir.join("x.txt")), "hi");
    assert_eq!(head_commit(dir), Some(first));
    assert_eq!(stored_objects(dir), first_objects);
    assert!(index_lines(dir)[1].starts_with("x.txt 0 "));
    assert_eq!(
        stdout_of(&mut run_kit_command(dir, &["log", "--oneline"])).lines().count(),
        1
    );
}

#[rstest]
fn revert_to_an_unknown_commit_is_reported(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("x.txt"), "hi".to_string()));
    add_and_commit(dir, "first");

    run_kit_command(dir, &["revert", "deadbeef"])
        .assert()
        .success()
        .stdout(predicate::str::diff("fatal: commit deadbeef does not exist\n"));
}
