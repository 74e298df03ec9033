//! Staging index
//!
//! The index tracks every working-tree path together with the object ID of its last
//! known content and a stage: unmodified, staged, or untracked.
//!
//! ## Index File Format
//!
//! - Header line: `<entry-count> <format-tag>`
//! - One line per entry: `<path> <stage-number> <object-id>`
//!
//! ## Reconciliation
//!
//! Loading the index also reconciles it with the working tree: entries whose file
//! disappeared are dropped, and files without an entry show up as untracked.

use crate::areas::workspace::Workspace;
use crate::artifacts::errors::KitError;
use crate::artifacts::index::FORMAT_TAG;
use crate::artifacts::index::index_entry::{IndexEntry, Stage};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Staging index
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.kit/index`)
    path: Box<Path>,
    /// Entries mapped by root-relative path
    entries: BTreeMap<PathBuf, IndexEntry>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    /// Create a new empty index
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the index file (typically `.kit/index`)
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    /// Get the path to the index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    /// Clear all entries from the index
    fn clear(&mut self) {
        self.entries.clear();
        self.changed = false;
    }

    /// Load the index from disk and reconcile it with the working tree
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self, workspace: &Workspace) -> anyhow::Result<()> {
        self.clear();

        if self.path().exists() {
            let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
            let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

            let reader = BufReader::new(lock.deref_mut());
            self.parse_entries(reader)?;
        }

        self.reconcile(workspace)
    }

    fn parse_entries(&mut self, reader: impl BufRead) -> anyhow::Result<()> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        if header.trim().is_empty() {
            return Ok(());
        }

        let entries_count = Self::parse_header(&header)?;

        for _ in 0..entries_count {
            let line = lines
                .next()
                .ok_or_else(|| KitError::CorruptIndex("fewer entries than announced".into()))??;
            let entry = IndexEntry::parse_line(&line)
                .map_err(|error| KitError::CorruptIndex(error.to_string()))?;

            self.entries.insert(entry.path.clone(), entry);
        }

        Ok(())
    }

    fn parse_header(header: &str) -> Result<usize, KitError> {
        let mut fields = header.split_whitespace();

        let entries_count = fields
            .next()
            .and_then(|count| count.parse::<usize>().ok())
            .ok_or_else(|| KitError::CorruptIndex(format!("invalid header: {:?}", header)))?;

        match fields.next() {
            Some(FORMAT_TAG) => Ok(entries_count),
            Some(tag) => Err(KitError::CorruptIndex(format!(
                "unsupported format tag: {}",
                tag
            ))),
            None => Err(KitError::CorruptIndex("missing format tag".into())),
        }
    }

    /// Drop entries whose file is gone and add untracked entries for new files
    fn reconcile(&mut self, workspace: &Workspace) -> anyhow::Result<()> {
        let before = self.entries.len();
        self.entries
            .retain(|path, _| workspace.file_exists(path));
        if self.entries.len() != before {
            debug!(dropped = before - self.entries.len(), "dropped entries of deleted files");
            self.changed = true;
        }

        for path in workspace.list_files(None)? {
            if self.entries.contains_key(&path) {
                continue;
            }

            let oid = Self::placeholder_oid(workspace, &path)?;
            trace!(path = %path.display(), "found untracked file");
            self.entries
                .insert(path.clone(), IndexEntry::new(path, oid, Stage::Untracked));
            self.changed = true;
        }

        Ok(())
    }

    /// ID the file's content would get if stored; nothing is written
    fn placeholder_oid(workspace: &Workspace, path: &Path) -> anyhow::Result<ObjectId> {
        let content = workspace.read_file(path).unwrap_or_else(|error| {
            warn!(path = %path.display(), %error, "unable to read untracked file");
            Default::default()
        });

        Blob::new(content).object_id()
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut content = format!("{} {}\n", self.entries.len(), FORMAT_TAG);
        for entry in self.entries() {
            content.push_str(&entry.to_line());
            content.push('\n');
        }
        lock.deref_mut().write_all(content.as_bytes())?;

        self.changed = false;

        Ok(())
    }

    /// Mark an entry as staged with new content
    pub fn stage(&mut self, path: &Path, oid: ObjectId) -> anyhow::Result<()> {
        let entry = self
            .entries
            .get_mut(path)
            .ok_or_else(|| anyhow::anyhow!("path {:?} is not in the index", path))?;

        entry.oid = oid;
        entry.stage = Stage::Staged;
        self.changed = true;

        Ok(())
    }

    /// Mark an entry as untracked
    ///
    /// # Returns
    ///
    /// The entry's previous state, or None if the path is not in the index
    pub fn untrack(&mut self, path: &Path) -> Option<IndexEntry> {
        let entry = self.entries.get_mut(path)?;
        let previous = entry.clone();

        entry.stage = Stage::Untracked;
        self.changed = true;

        Some(previous)
    }

    /// Reset every staged entry to unmodified after a commit
    pub fn clear_staged(&mut self) {
        self.entries
            .values_mut()
            .filter(|entry| entry.is_staged())
            .for_each(|entry| entry.stage = Stage::Unmodified);
        self.changed = true;
    }

    /// Replace all entries with the files of a snapshot, all unmodified
    pub fn reset(&mut self, files: impl IntoIterator<Item = (PathBuf, ObjectId)>) {
        self.entries = files
            .into_iter()
            .map(|(path, oid)| {
                (
                    path.clone(),
                    IndexEntry::new(path, oid, Stage::Unmodified),
                )
            })
            .collect();
        self.changed = true;
    }

    pub fn is_staged(&self) -> bool {
        self.entries().any(IndexEntry::is_staged)
    }

    pub fn has_untracked(&self) -> bool {
        self.entries().any(IndexEntry::is_untracked)
    }

    pub fn staged_paths(&self) -> Vec<PathBuf> {
        self.paths_in_stage(Stage::Staged)
    }

    pub fn untracked_paths(&self) -> Vec<PathBuf> {
        self.paths_in_stage(Stage::Untracked)
    }

    fn paths_in_stage(&self, stage: Stage) -> Vec<PathBuf> {
        self.entries()
            .filter(|entry| entry.stage == stage)
            .map(|entry| entry.path.clone())
            .collect()
    }

    /// Whether any entry other than `path` references `oid`
    pub fn is_referenced_elsewhere(&self, path: &Path, oid: &ObjectId) -> bool {
        self.entries()
            .any(|entry| entry.path != path && !entry.is_untracked() && entry.oid == *oid)
    }
}
