use crate::common::command::{kit_commit, repository_dir, run_kit_command};
use crate::common::file::{FileSpec, write_file};
use crate::common::repository::{
    commit_parent, commit_tree, head_commit, read_object, stored_objects, tree_entry,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn first_commit_stores_commit_tree_and_blob(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("x.txt"), "hi".to_string()));
    run_kit_command(dir, &["add", "x.txt"]).assert().success();

    kit_commit(dir, "first")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[master\] [0-9a-f]{40}: first\n1 files changed\n  x\.txt\n$").unwrap());

    let head = head_commit(dir).unwrap();
    let tree = commit_tree(dir, &head);
    let blob = tree_entry(dir, &tree, "x.txt").unwrap();
    assert_eq!(
        stored_objects(dir),
        [head.clone(), tree, blob.clone()].into_iter().collect()
    );
    assert_eq!(read_object(dir, &blob), "hi");
    assert_eq!(commit_parent(dir, &head), None);
    // 2023-01-01 12:00:00 UTC
    assert!(read_object(dir, &head).contains("time 1672574400\n"));
}

#[rstest]
fn nested_directories_become_nested_trees(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a/2.txt"), "two".to_string()));
    write_file(FileSpec::new(dir.join("a/b/3.txt"), "three".to_string()));
    run_kit_command(dir, &["add", "."]).assert().success();

    kit_commit(dir, "nested")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 files changed\n  1.txt\n  a/2.txt\n  a/b/3.txt\n"));

    let root = commit_tree(dir, &head_commit(dir).unwrap());
    let a = tree_entry(dir, &root, "a").unwrap();
    let b = tree_entry(dir, &a, "b").unwrap();
    let lines = read_object(dir, &root).lines().map(str::to_string).collect::<Vec<_>>();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("blob ") && lines[0].ends_with(" 1.txt"));
    assert_eq!(lines[1], format!("tree {} a", a));
    assert_eq!(
        read_object(dir, &tree_entry(dir, &b, "3.txt").unwrap()),
        "three"
    );
}

#[rstest]
fn second_commit_points_at_the_first(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("x.txt"), "hi".to_string()));
    run_kit_command(dir, &["add", "x.txt"]).assert().success();
    kit_commit(dir, "first").assert().success();
    let first = head_commit(dir).unwrap();

    write_file(FileSpec::new(dir.join("x.txt"), "bye".to_string()));
    run_kit_command(dir, &["add", "x.txt"]).assert().success();
    kit_commit(dir, "second").assert().success();
    let second = head_commit(dir).unwrap();

    assert_eq!(commit_parent(dir, &second), Some(first));
    run_kit_command(dir, &["status", "--porcelain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
