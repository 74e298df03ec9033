use crate::areas::repository::Repository;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use tracing::debug;

impl Repository {
    /// Restore the working tree to the snapshot of a commit
    ///
    /// Head and the index stay where they are. Refuses to run while untracked files
    /// exist, since they would be wiped out.
    pub async fn checkout(&self, target: &str) -> anyhow::Result<()> {
        let commit_oid = self.resolve_commit(target)?;

        let untracked = self
            .with_index(|index| Ok(index.untracked_paths()))
            .await?;
        if !untracked.is_empty() {
            return Err(KitError::UncommittedChanges(untracked).into());
        }

        self.materialize(&commit_oid)?;

        Ok(())
    }

    /// Replace the working tree with the files of a commit
    ///
    /// Every blob is read before the working tree is cleared, so a missing object
    /// leaves the working tree untouched.
    ///
    /// # Returns
    ///
    /// The `(path, blob-id)` pairs written
    pub fn materialize(&self, commit_oid: &ObjectId) -> anyhow::Result<Vec<(PathBuf, ObjectId)>> {
        let commit = self.database().parse_object_as_commit(commit_oid)?;
        let files = self.database().list_tree_files(commit.tree_oid())?;

        let contents = files
            .iter()
            .map(|(_, oid)| self.database().parse_object_as_blob(oid))
            .collect::<anyhow::Result<Vec<_>>>()?;

        self.workspace().clear()?;

        for ((path, _), blob) in files.iter().zip(contents) {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                self.workspace().make_directory(parent)?;
            }
            self.workspace().write_file(path, blob.content())?;
        }
        debug!(commit = %commit_oid, files = files.len(), "materialized snapshot");

        Ok(files)
    }
}
