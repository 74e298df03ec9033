use crate::areas::repository::Repository;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::snapshot::tree_builder::TreeBuilder;
use colored::Colorize;

impl Repository {
    pub async fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.with_index(|index| {
            if !index.is_staged() {
                return Err(KitError::NothingStaged.into());
            }

            let parent = self.refs().read_head()?;
            let parent_tree = match &parent {
                Some(parent) => Some(
                    self.database()
                        .parse_object_as_commit(parent)?
                        .tree_oid()
                        .clone(),
                ),
                None => None,
            };

            let entries = index.entries().cloned().collect::<Vec<_>>();
            let built = TreeBuilder::new(self.database(), parent_tree).build(&entries)?;

            let commit = Commit::new(
                built.oid,
                parent,
                Commit::timestamp_from_env(),
                message.trim().to_string(),
            );
            let commit_oid = self.database().store(&commit)?;
            self.refs().update_head(&commit_oid)?;

            writeln!(
                self.writer(),
                "[{}] {}: {}",
                self.refs().current_branch()?,
                commit_oid.as_ref().yellow(),
                commit.short_message()
            )?;
            writeln!(self.writer(), "{} files changed", built.changed_files)?;
            for path in index.staged_paths() {
                writeln!(self.writer(), "  {}", path.display())?;
            }

            index.clear_staged();

            Ok(())
        })
        .await
    }
}
