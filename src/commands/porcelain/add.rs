use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::blob::Blob;
use std::path::{Path, PathBuf};
use tracing::debug;

impl Repository {
    pub async fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        if paths.is_empty() {
            writeln!(self.writer(), "Nothing specified, nothing added.")?;
            return Ok(());
        }

        self.with_index(|index| {
            for path in paths {
                let Some(files) = self.expand_path(path)? else {
                    writeln!(self.writer(), "{} did not match any files", path)?;
                    continue;
                };

                for file in files {
                    self.stage_file(index, &file)?;
                }
            }

            Ok(())
        })
        .await
    }

    /// Stage `file` if its content differs from what its entry points at
    fn stage_file(&self, index: &mut Index, file: &Path) -> anyhow::Result<()> {
        let entry = index
            .entry_by_path(file)
            .ok_or_else(|| anyhow::anyhow!("{:?} is missing from the index", file))?;
        let content = self.workspace().read_file(file)?;

        // an untracked entry's ID names content that was never stored
        let changed = entry.is_untracked()
            || match self.database().parse_object_as_blob(&entry.oid) {
                Ok(stored) => stored.differs_from(&content),
                Err(error) if KitError::is_missing_object(&error) => true,
                Err(error) => return Err(error),
            };

        if changed {
            let oid = self.database().store(&Blob::new(content))?;
            debug!(path = %file.display(), %oid, "staged file");
            index.stage(file, oid)?;
        }

        Ok(())
    }

    /// Expand a command-line path into the workspace files below it
    ///
    /// Returns None when the path does not exist, lies outside the repository, or
    /// holds no files.
    pub(crate) fn expand_path(&self, path: &str) -> anyhow::Result<Option<Vec<PathBuf>>> {
        let absolute_path = std::env::current_dir()?.join(path);
        let Ok(absolute_path) = absolute_path.canonicalize() else {
            return Ok(None);
        };
        if !absolute_path.starts_with(self.path()) {
            return Ok(None);
        }

        let files = self.workspace().list_files(Some(&absolute_path))?;

        Ok((!files.is_empty()).then_some(files))
    }
}
