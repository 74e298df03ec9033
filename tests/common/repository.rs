//! Readers for the on-disk layout under `.kit`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub fn metadata_dir(dir: &Path) -> PathBuf {
    dir.join(".kit")
}

pub fn head_commit(dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(metadata_dir(dir).join("refs/heads/master")).ok()?;
    let content = content.trim();

    (!content.is_empty()).then(|| content.to_string())
}

pub fn object_path(dir: &Path, oid: &str) -> PathBuf {
    metadata_dir(dir).join("objects").join(oid)
}

pub fn object_exists(dir: &Path, oid: &str) -> bool {
    object_path(dir, oid).is_file()
}

pub fn stored_objects(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(metadata_dir(dir).join("objects"))
        .expect("Failed to list objects")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

pub fn read_object(dir: &Path, oid: &str) -> String {
    std::fs::read_to_string(object_path(dir, oid))
        .unwrap_or_else(|e| panic!("Failed to read object {}: {}", oid, e))
}

pub fn commit_tree(dir: &Path, commit_oid: &str) -> String {
    read_object(dir, commit_oid)
        .lines()
        .find_map(|line| line.strip_prefix("tree "))
        .expect("Commit without tree line")
        .to_string()
}

pub fn commit_parent(dir: &Path, commit_oid: &str) -> Option<String> {
    read_object(dir, commit_oid)
        .lines()
        .find_map(|line| line.strip_prefix("parent"))
        .map(|parent| parent.trim().to_string())
        .filter(|parent| !parent.is_empty())
}

/// Object ID of the entry `name` of a tree
pub fn tree_entry(dir: &Path, tree_oid: &str, name: &str) -> Option<String> {
    read_object(dir, tree_oid).lines().find_map(|line| {
        let mut fields = line.splitn(3, ' ');
        let (_kind, oid, entry_name) = (fields.next()?, fields.next()?, fields.next()?);
        (entry_name == name).then(|| oid.to_string())
    })
}

/// Every object reachable from a commit, the commit included
pub fn reachable_objects(dir: &Path, commit_oid: &str) -> BTreeSet<String> {
    fn walk_tree(dir: &Path, tree_oid: &str, objects: &mut BTreeSet<String>) {
        objects.insert(tree_oid.to_string());
        for line in read_object(dir, tree_oid).lines() {
            let mut fields = line.splitn(3, ' ');
            let (kind, oid) = (fields.next().unwrap(), fields.next().unwrap());
            if kind == "tree" {
                walk_tree(dir, oid, objects);
            } else {
                objects.insert(oid.to_string());
            }
        }
    }

    let mut objects = BTreeSet::from([commit_oid.to_string()]);
    walk_tree(dir, &commit_tree(dir, commit_oid), &mut objects);
    objects
}

pub fn index_lines(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(metadata_dir(dir).join("index"))
        .expect("Failed to read index")
        .lines()
        .map(str::to_string)
        .collect()
}
