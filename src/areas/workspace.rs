use crate::METADATA_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const IGNORED_PATHS: [&str; 3] = [METADATA_DIR, ".", ".."];

/// Working directory of a repository
///
/// All paths taken and returned by the workspace are relative to its root, except
/// for `list_files`, which also accepts absolute paths inside the root.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List files recursively, skipping the metadata directory
    ///
    /// With no argument the whole working tree is listed. A file argument yields
    /// just that file. Returned paths are relative to the workspace root and sorted.
    pub fn list_files(&self, root_file_path: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        // Check if the root_file_path exists
        if !root_file_path.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root_file_path);
        }

        // nothing under the metadata directory is a workspace file
        if self
            .relative_path(&root_file_path)
            .is_some_and(|path| Self::is_ignored(&path))
        {
            return Ok(Vec::new());
        }

        if root_file_path.is_dir() {
            let mut files = WalkDir::new(&root_file_path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !Self::is_ignored_entry(entry))
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .filter_map(|entry| self.relative_path(entry.path()))
                .collect::<Vec<_>>();
            files.sort();
            Ok(files)
        } else {
            Ok(self
                .relative_path(&root_file_path)
                .filter(|path| !Self::is_ignored(path))
                .into_iter()
                .collect())
        }
    }

    fn is_ignored_entry(entry: &DirEntry) -> bool {
        entry.depth() > 0
            && IGNORED_PATHS.contains(&entry.file_name().to_string_lossy().as_ref())
    }

    fn is_ignored(path: &Path) -> bool {
        // Check if any component of the path is in IGNORED_PATHS
        path.components().any(|component| {
            if let Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(self.path.as_ref())
            .ok()
            .filter(|relative| !relative.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }

    pub fn file_exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        std::fs::write(&path, data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    pub fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        let dir_path = self.path.join(dir_path);

        if dir_path.is_file() {
            std::fs::remove_file(&dir_path)?;
        }
        if !dir_path.is_dir() {
            std::fs::create_dir_all(&dir_path)
                .with_context(|| format!("Failed to create directory: {:?}", dir_path))?;
        }

        Ok(())
    }

    /// Remove every file and directory of the working tree except the metadata directory
    pub fn clear(&self) -> anyhow::Result<()> {
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let name = entry.file_name();
            if IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()) {
                continue;
            }

            let path = entry.path();
            if entry.file_type()?.is_dir() {
                std::fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove directory: {:?}", path))?;
            } else {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove file: {:?}", path))?;
            }
        }

        Ok(())
    }
}
