//! Garbage collection for revert
//!
//! Reverting to an ancestor discards every commit newer than it. Objects those
//! commits reach may still be shared with the kept history, since unchanged
//! subtrees and identical files are stored once. Collection therefore runs in
//! three phases:
//!
//! 1. Keep: every object reachable from the target commit and all of its ancestors
//! 2. Mark: every object reachable from a discarded commit and not kept, in
//!    post-order so children come before the tree or commit referencing them
//! 3. Sweep: delete the marked objects in mark order
//!
//! Marking before sweeping means an object shared by several discarded commits is
//! deleted exactly once.

use crate::areas::database::Database;
use crate::artifacts::errors::KitError;
use crate::artifacts::history::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[cfg(feature = "debug_gc")]
use tracing::trace;

/// Number of objects deleted by a sweep, per kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcStats {
    pub commits_deleted: usize,
    pub trees_deleted: usize,
    pub blobs_deleted: usize,
}

impl GcStats {
    pub fn total(&self) -> usize {
        self.commits_deleted + self.trees_deleted + self.blobs_deleted
    }
}

/// Every commit, tree and blob reachable from `head` and its ancestors
pub fn reachable_from_history(
    database: &Database,
    head: Option<&ObjectId>,
) -> anyhow::Result<HashSet<ObjectId>> {
    let mut reachable = HashSet::new();

    for item in RevList::new(database, head.cloned()) {
        let (commit_oid, commit) = item?;
        reachable.insert(commit_oid);
        collect_tree(database, commit.tree_oid(), &mut reachable)?;
    }
    debug!(objects = reachable.len(), "computed reachable set");

    Ok(reachable)
}

fn collect_tree(
    database: &Database,
    tree_oid: &ObjectId,
    reachable: &mut HashSet<ObjectId>,
) -> anyhow::Result<()> {
    // shared subtrees are walked once
    if !reachable.insert(tree_oid.clone()) {
        return Ok(());
    }

    let tree = database.parse_object_as_tree(tree_oid)?;
    for (_, entry) in tree.into_entries() {
        if entry.is_tree() {
            collect_tree(database, &entry.oid, reachable)?;
        } else {
            reachable.insert(entry.oid);
        }
    }

    Ok(())
}

pub struct GarbageCollector<'d> {
    database: &'d Database,
    keep: HashSet<ObjectId>,
    marked: HashSet<ObjectId>,
    garbage: Vec<(ObjectId, ObjectType)>,
}

impl<'d> GarbageCollector<'d> {
    /// Prepare a collection keeping everything reachable from `keep_from`'s history
    pub fn new(database: &'d Database, keep_from: &ObjectId) -> anyhow::Result<Self> {
        Ok(GarbageCollector {
            database,
            keep: reachable_from_history(database, Some(keep_from))?,
            marked: HashSet::new(),
            garbage: Vec::new(),
        })
    }

    /// Commits strictly newer than `target`, head first
    ///
    /// Fails with [`KitError::NotAnAncestor`] when the walk from `head` reaches the
    /// root without meeting `target`.
    pub fn discarded_commits(
        database: &Database,
        head: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let mut discarded = Vec::new();

        for item in RevList::new(database, Some(head.clone())) {
            let (commit_oid, _) = item?;
            if commit_oid == *target {
                return Ok(discarded);
            }
            discarded.push(commit_oid);
        }

        Err(KitError::NotAnAncestor(target.to_string()).into())
    }

    /// Mark the objects only the commit `commit_oid` reaches
    pub fn mark_commit(&mut self, commit_oid: &ObjectId) -> anyhow::Result<()> {
        if self.keep.contains(commit_oid) || self.marked.contains(commit_oid) {
            return Ok(());
        }

        let commit = match self.database.parse_object_as_commit(commit_oid) {
            Ok(commit) => commit,
            Err(error) if KitError::is_missing_object(&error) => {
                warn!(oid = %commit_oid, "discarded commit is already gone");
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        self.mark_tree(commit.tree_oid())?;
        self.mark(commit_oid.clone(), ObjectType::Commit);

        Ok(())
    }

    /// Mark a stored blob no commit refers to, such as content staged but never committed
    pub fn mark_blob(&mut self, blob_oid: &ObjectId) {
        if self.keep.contains(blob_oid)
            || self.marked.contains(blob_oid)
            || !self.database.exists(blob_oid)
        {
            return;
        }

        self.mark(blob_oid.clone(), ObjectType::Blob);
    }

    fn mark_tree(&mut self, tree_oid: &ObjectId) -> anyhow::Result<()> {
        if self.keep.contains(tree_oid) || self.marked.contains(tree_oid) {
            return Ok(());
        }

        let tree = match self.database.parse_object_as_tree(tree_oid) {
            Ok(tree) => tree,
            Err(error) if KitError::is_missing_object(&error) => {
                warn!(oid = %tree_oid, "discarded tree is already gone");
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        for (_, entry) in tree.into_entries() {
            if entry.is_tree() {
                self.mark_tree(&entry.oid)?;
            } else if !self.keep.contains(&entry.oid) && !self.marked.contains(&entry.oid) {
                self.mark(entry.oid, ObjectType::Blob);
            }
        }
        self.mark(tree_oid.clone(), ObjectType::Tree);

        Ok(())
    }

    fn mark(&mut self, oid: ObjectId, kind: ObjectType) {
        #[cfg(feature = "debug_gc")]
        trace!(%oid, %kind, "marked as garbage");

        self.marked.insert(oid.clone());
        self.garbage.push((oid, kind));
    }

    /// Objects marked so far, in deletion order
    pub fn garbage(&self) -> impl Iterator<Item = &ObjectId> {
        self.garbage.iter().map(|(oid, _)| oid)
    }

    /// Delete every marked object
    pub fn sweep(self) -> anyhow::Result<GcStats> {
        let mut stats = GcStats::default();

        for (oid, kind) in self.garbage {
            self.database.delete(&oid)?;
            match kind {
                ObjectType::Commit => stats.commits_deleted += 1,
                ObjectType::Tree => stats.trees_deleted += 1,
                ObjectType::Blob => stats.blobs_deleted += 1,
            }
        }

        info!(
            commits = stats.commits_deleted,
            trees = stats.trees_deleted,
            blobs = stats.blobs_deleted,
            "swept discarded history"
        );

        Ok(stats)
    }
}
