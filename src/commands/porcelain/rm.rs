use crate::areas::repository::Repository;
use crate::artifacts::history::gc::reachable_from_history;
use tracing::debug;

impl Repository {
    /// Stop tracking files without touching the working tree
    ///
    /// The stored content goes away too, unless the committed history or another
    /// index entry still refers to it.
    pub async fn rm(&self, paths: &[String]) -> anyhow::Result<()> {
        if paths.is_empty() {
            writeln!(self.writer(), "Nothing specified, nothing removed.")?;
            return Ok(());
        }

        let head = self.refs().read_head()?;
        let committed = reachable_from_history(self.database(), head.as_ref())?;

        self.with_index(|index| {
            for path in paths {
                let Some(files) = self.expand_path(path)? else {
                    writeln!(self.writer(), "{} did not match any files", path)?;
                    continue;
                };

                for file in files {
                    let Some(previous) = index.untrack(&file) else {
                        continue;
                    };
                    if previous.is_untracked()
                        || committed.contains(&previous.oid)
                        || index.is_referenced_elsewhere(&file, &previous.oid)
                    {
                        continue;
                    }

                    debug!(path = %file.display(), oid = %previous.oid, "dropping unstaged content");
                    self.database().delete(&previous.oid)?;
                }
            }

            Ok(())
        })
        .await
    }
}
