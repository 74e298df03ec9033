use crate::areas::database::Database;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// Result of building a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTree {
    /// ID of the stored tree
    pub oid: ObjectId,
    /// Number of staged files the snapshot picked up
    pub changed_files: usize,
    pub is_empty: bool,
}

/// An index entry together with the path components still to descend
struct Pending<'e> {
    names: Vec<String>,
    entry: &'e IndexEntry,
}

/// Builds the tree objects of a new commit
///
/// Untracked entries never make it into a snapshot. A subdirectory whose content
/// matches the parent snapshot is not rebuilt; the parent's tree ID is referenced
/// as is.
#[derive(new)]
pub struct TreeBuilder<'d> {
    database: &'d Database,
    /// Root tree of the parent commit, None for the root commit
    parent_tree: Option<ObjectId>,
}

impl TreeBuilder<'_> {
    pub fn build(&self, entries: &[IndexEntry]) -> anyhow::Result<BuiltTree> {
        let pending = entries
            .iter()
            .map(|entry| Pending {
                names: path_names(&entry.path),
                entry,
            })
            .filter(|pending| !pending.names.is_empty())
            .collect();

        // the root is stored even when empty, every other level only when referenced
        let (tree, changed_files) = self.build_level(pending, Path::new(""))?;
        let built = BuiltTree {
            oid: self.database.store(&tree)?,
            changed_files,
            is_empty: tree.is_empty(),
        };
        debug!(oid = %built.oid, changed = built.changed_files, "built snapshot");

        Ok(built)
    }

    /// Assemble the tree of one directory level, storing its non-empty subtrees
    fn build_level(&self, pending: Vec<Pending>, prefix: &Path) -> anyhow::Result<(Tree, usize)> {
        let mut tree = Tree::default();
        let mut changed_files = 0;
        let mut directories = BTreeMap::<String, Vec<Pending>>::new();

        for mut item in pending {
            if item.names.len() > 1 {
                let name = item.names.remove(0);
                directories.entry(name).or_default().push(item);
                continue;
            }

            if item.entry.is_untracked() {
                continue;
            }
            if item.entry.is_staged() {
                changed_files += 1;
            }
            tree.add_entry(
                item.names.remove(0),
                TreeEntry::new(item.entry.oid.clone(), ObjectType::Blob),
            )?;
        }

        for (name, children) in directories {
            let path = prefix.join(&name);

            if let Some(oid) = self.unchanged_subtree(&path, &children)? {
                trace!(path = %path.display(), %oid, "reused unchanged subtree");
                tree.add_entry(name, TreeEntry::new(oid, ObjectType::Tree))?;
                continue;
            }

            let (subtree, subtree_changes) = self.build_level(children, &path)?;
            changed_files += subtree_changes;
            // a directory holding only untracked files has nothing to snapshot
            if subtree.is_empty() {
                continue;
            }
            let oid = self.database.store(&subtree)?;
            tree.add_entry(name, TreeEntry::new(oid, ObjectType::Tree))?;
        }

        Ok((tree, changed_files))
    }

    /// ID of the parent snapshot's tree at `path` when the directory did not change
    ///
    /// A directory is unchanged when none of its entries is staged and its tracked
    /// files are exactly the files of the parent's tree at the same path. This also
    /// catches files removed with `rm` or deleted from the working tree.
    fn unchanged_subtree(
        &self,
        path: &Path,
        children: &[Pending],
    ) -> anyhow::Result<Option<ObjectId>> {
        let Some(parent_tree) = &self.parent_tree else {
            return Ok(None);
        };
        if children.iter().any(|child| child.entry.is_staged()) {
            return Ok(None);
        }

        let counterpart = match self.database.find_tree_entry(parent_tree, path)? {
            Some(entry) if entry.is_tree() => entry.oid,
            _ => return Ok(None),
        };

        let tracked = children
            .iter()
            .filter(|child| !child.entry.is_untracked())
            .map(|child| {
                (
                    child.names.iter().collect::<PathBuf>(),
                    child.entry.oid.clone(),
                )
            })
            .collect::<BTreeSet<_>>();
        let stored = self
            .database
            .list_tree_files(&counterpart)?
            .into_iter()
            .collect::<BTreeSet<_>>();

        Ok((tracked == stored).then_some(counterpart))
    }
}

fn path_names(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect()
}
