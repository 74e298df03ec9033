use crate::common::command::{repository_dir, run_kit_command};
use crate::common::file::{FileSpec, write_file};
use crate::common::repository::index_lines;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_files_from_nested_directories(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("a/b/c.txt"), "c".to_string()));
    write_file(FileSpec::new(dir.join("a/d.txt"), "d".to_string()));
    write_file(FileSpec::new(dir.join("e f.txt"), "spaced".to_string()));

    run_kit_command(dir, &["add", "a"]).assert().success();

    let stages = index_lines(dir)
        .into_iter()
        .skip(1)
        .map(|line| {
            let mut fields = line.rsplitn(3, ' ');
            let _oid = fields.next().unwrap();
            let stage = fields.next().unwrap().to_string();
            (fields.next().unwrap().to_string(), stage)
        })
        .collect::<Vec<_>>();

    assert_eq!(
        stages,
        vec![
            ("a/b/c.txt".to_string(), "1".to_string()),
            ("a/d.txt".to_string(), "1".to_string()),
            ("e f.txt".to_string(), "2".to_string()),
        ]
    );
}
