use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::status::file_status::FileStatus;
use std::collections::BTreeMap;

const SECTION_HINTS: [(FileStatus, &str); 2] = [
    (
        FileStatus::Staged,
        "   (use the rm command to unstage the files)",
    ),
    (
        FileStatus::Untracked,
        "   (use \"add/rm <file>...\" to update what will be committed)",
    ),
];

#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    pub porcelain: bool,
}

impl Repository {
    pub async fn status(&self, options: &StatusOptions) -> anyhow::Result<()> {
        let entries = self
            .with_index(|index| Ok(index.entries().cloned().collect::<Vec<_>>()))
            .await?;

        if options.porcelain {
            self.print_porcelain_format(&entries)
        } else {
            self.print_long_format(&entries)
        }
    }

    fn print_porcelain_format(&self, entries: &[IndexEntry]) -> anyhow::Result<()> {
        for entry in entries {
            if let Some(status) = FileStatus::of(entry) {
                writeln!(
                    self.writer(),
                    "{} {}",
                    status.porcelain_code(),
                    entry.display_path()
                )?;
            }
        }

        Ok(())
    }

    fn print_long_format(&self, entries: &[IndexEntry]) -> anyhow::Result<()> {
        writeln!(self.writer(), "On branch {}", self.refs().current_branch()?)?;

        let mut sections = BTreeMap::<FileStatus, Vec<&IndexEntry>>::new();
        for entry in entries {
            if let Some(status) = FileStatus::of(entry) {
                sections.entry(status).or_default().push(entry);
            }
        }

        for (status, hint) in SECTION_HINTS {
            let Some(section) = sections.get(&status) else {
                continue;
            };

            writeln!(self.writer(), "{}", <&str>::from(&status))?;
            writeln!(self.writer(), "{}", hint)?;
            for entry in section {
                writeln!(self.writer(), "  \t{}", status.paint(&entry.display_path()))?;
            }
        }

        Ok(())
    }
}
