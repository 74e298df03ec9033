use crate::areas::repository::Repository;
use crate::artifacts::history::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub oneline: bool,
}

impl Repository {
    pub fn log(&self, options: &LogOptions) -> anyhow::Result<()> {
        let Some(head) = self.refs().read_head()? else {
            writeln!(self.writer(), "No commits to display")?;
            return Ok(());
        };
        let branch = self.refs().current_branch()?;

        for item in RevList::new(self.database(), Some(head.clone())) {
            let (commit_oid, commit) = item?;

            if options.oneline {
                self.show_commit_oneline(&commit_oid, &commit)?;
            } else {
                let decoration = (commit_oid == head).then(|| format!(" (HEAD -> {})", branch));
                self.show_commit_medium(&commit_oid, &commit, decoration)?;
            }
        }

        Ok(())
    }

    fn show_commit_medium(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        decoration: Option<String>,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "commit: {}{}",
            commit_oid.as_ref().yellow(),
            decoration.as_deref().unwrap_or_default().cyan()
        )?;
        writeln!(self.writer(), "time: {}", commit.readable_timestamp())?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "\t{}", message_line)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }

    fn show_commit_oneline(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            commit_oid.to_short_oid().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}
