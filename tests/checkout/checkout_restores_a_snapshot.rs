use crate::common::command::{add_and_commit, init_repository_dir, run_kit_command};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::common::repository::head_commit;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_restores_a_snapshot(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = head_commit(dir).unwrap();

    write_file(FileSpec::new(dir.join("a/b/3.txt"), "three, edited".to_string()));
    write_file(FileSpec::new(dir.join("c/4.txt"), "four".to_string()));
    let second = add_and_commit(dir, "second");

    run_kit_command(dir, &["checkout", &first[..8]])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(read_file(&dir.join("a/b/3.txt")), "three");
    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert!(!dir.join("c").exists());
    // checkout moves the working tree only
    assert_eq!(head_commit(dir), Some(second.clone()));

    run_kit_command(dir, &["checkout", &second])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("c/4.txt")), "four");
}

#[rstest]
fn checkout_of_an_unknown_commit_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let unknown = "0".repeat(40);

    run_kit_command(dir, &["checkout", &unknown])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "fatal: commit {} does not exist\n",
            unknown
        )));

    assert_eq!(read_file(&dir.join("1.txt")), "one");
}
