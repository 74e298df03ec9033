use crate::common::command::{add_and_commit, repository_dir, run_kit_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_multiple_commits_in_medium_format(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();

    let mut commits = Vec::new();
    for position in 1..=3 {
        write_file(FileSpec::new(dir.join("x.txt"), format!("version {}", position)));
        commits.push(add_and_commit(dir, &format!("commit {}", position)));
    }

    let output = stdout_of(&mut run_kit_command(dir, &["log"]));
    let headers = output
        .lines()
        .filter(|line| line.starts_with("commit: "))
        .collect::<Vec<_>>();
    let messages = output
        .lines()
        .filter_map(|line| line.strip_prefix('\t'))
        .collect::<Vec<_>>();

    assert_eq!(
        headers,
        vec![
            format!("commit: {} (HEAD -> master)", commits[2]),
            format!("commit: {}", commits[1]),
            format!("commit: {}", commits[0]),
        ]
    );
    assert_eq!(messages, vec!["commit 3", "commit 2", "commit 1"]);
    assert_eq!(output.lines().filter(|line| line.starts_with("time: ")).count(), 3);
}

#[rstest]
fn verify_medium_format_structure(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("x.txt"), "hi".to_string()));
    let head = add_and_commit(dir, "first");

    let output = stdout_of(&mut run_kit_command(dir, &["log"]));
    let lines = output.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], format!("commit: {} (HEAD -> master)", head));
    assert!(lines[1].starts_with("time: ") && lines[1].contains("2023"));
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "\tfirst");
    assert_eq!(lines[4], "");
}
