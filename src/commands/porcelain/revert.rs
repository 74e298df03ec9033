use crate::areas::repository::Repository;
use crate::artifacts::errors::KitError;
use crate::artifacts::history::gc::GarbageCollector;
use colored::Colorize;

impl Repository {
    /// Move Head back to an ancestor and delete what only the newer commits reach
    ///
    /// The working tree is restored to the target first; the index ends up matching
    /// the target's snapshot with every entry unmodified. Staged content that no
    /// kept commit refers to is deleted along with the discarded history.
    pub async fn revert(&self, target: &str) -> anyhow::Result<()> {
        let target_oid = self.resolve_commit(target)?;
        let head = self
            .refs()
            .read_head()?
            .ok_or_else(|| KitError::NotAnAncestor(target_oid.to_string()))?;
        let discarded = GarbageCollector::discarded_commits(self.database(), &head, &target_oid)?;

        self.with_index(|index| {
            let staged = index
                .entries()
                .filter(|entry| entry.is_staged())
                .map(|entry| entry.oid.clone())
                .collect::<Vec<_>>();
            let files = self.materialize(&target_oid)?;

            let mut collector = GarbageCollector::new(self.database(), &target_oid)?;
            for commit_oid in &discarded {
                collector.mark_commit(commit_oid)?;
            }
            // staged content dies with the index reset unless history still needs it
            for blob_oid in &staged {
                collector.mark_blob(blob_oid);
            }
            let stats = collector.sweep()?;

            self.refs().update_head(&target_oid)?;
            index.reset(files);

            let commit = self.database().parse_object_as_commit(&target_oid)?;
            writeln!(
                self.writer(),
                "HEAD is now at {} {}",
                target_oid.to_short_oid().yellow(),
                commit.short_message()
            )?;
            if !discarded.is_empty() {
                writeln!(
                    self.writer(),
                    "Discarded {} commits, deleted {} objects",
                    discarded.len(),
                    stats.total()
                )?;
            }

            Ok(())
        })
        .await
    }
}
