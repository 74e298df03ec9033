//! Object store
//!
//! A flat directory of write-once objects keyed by their identifier. The store never
//! updates an object in place and does no reference counting; deciding when an
//! object may go away is the job of the reachability walk run by `revert`.

use crate::artifacts::errors::KitError;
use crate::artifacts::objects::MIN_PREFIX_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Check whether an object with the given ID is stored
    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Store an object and return its ID
    ///
    /// Storing an object that already exists is a no-op.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            trace!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(&self.path).context(format!(
            "Unable to create objects directory {}",
            self.path.display()
        ))?;
        self.write_object(object_path, object.serialize()?)?;
        debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    /// Read the raw bytes of an object
    ///
    /// Fails with [`KitError::MissingObject`] if the object is not stored.
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        match std::fs::read(&object_path) {
            Ok(content) => Ok(content.into()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(KitError::MissingObject(object_id.clone()).into())
            }
            Err(error) => Err(error).context(format!(
                "Unable to read object file {}",
                object_path.display()
            )),
        }
    }

    /// Delete an object
    ///
    /// Deleting an object that is not stored is not an error.
    pub fn delete(&self, object_id: &ObjectId) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());

        match std::fs::remove_file(&object_path) {
            Ok(()) => {
                debug!(oid = %object_id, "deleted object");
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error).context(format!(
                "Unable to delete object file {}",
                object_path.display()
            )),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        self.parse_object(object_id)
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        self.parse_object(object_id)
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        self.parse_object(object_id)
    }

    fn parse_object<T: Unpackable>(&self, object_id: &ObjectId) -> anyhow::Result<T> {
        let content = self.load(object_id)?;

        T::deserialize(Cursor::new(content)).map_err(|error| {
            KitError::CorruptObject {
                oid: object_id.clone(),
                reason: error.to_string(),
            }
            .into()
        })
    }

    /// Look up the entry reachable at `path` from the tree `tree_oid`
    ///
    /// Walks one tree per path component; returns None as soon as a component is
    /// missing or names a blob where a tree is needed.
    pub fn find_tree_entry(
        &self,
        tree_oid: &ObjectId,
        path: &Path,
    ) -> anyhow::Result<Option<TreeEntry>> {
        let names = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().to_string()),
                _ => None,
            })
            .collect::<Vec<_>>();

        let Some((last, parents)) = names.split_last() else {
            return Ok(None);
        };

        let mut tree = self.parse_object_as_tree(tree_oid)?;
        for name in parents {
            match tree.entry(name) {
                Some(entry) if entry.is_tree() => {
                    let oid = entry.oid.clone();
                    tree = self.parse_object_as_tree(&oid)?;
                }
                _ => return Ok(None),
            }
        }

        Ok(tree.entry(last).cloned())
    }

    /// Flatten a tree into the list of files it snapshots
    ///
    /// # Returns
    ///
    /// `(path, blob-id)` pairs with root-relative paths, in name order
    pub fn list_tree_files(&self, tree_oid: &ObjectId) -> anyhow::Result<Vec<(PathBuf, ObjectId)>> {
        let mut files = Vec::new();
        self.collect_tree_files(tree_oid, Path::new(""), &mut files)?;
        Ok(files)
    }

    fn collect_tree_files(
        &self,
        tree_oid: &ObjectId,
        prefix: &Path,
        files: &mut Vec<(PathBuf, ObjectId)>,
    ) -> anyhow::Result<()> {
        let tree = self.parse_object_as_tree(tree_oid)?;

        for (name, entry) in tree.into_entries() {
            let path = prefix.join(name);
            if entry.is_tree() {
                self.collect_tree_files(&entry.oid, &path, files)?;
            } else {
                files.push((path, entry.oid));
            }
        }

        Ok(())
    }

    /// Find all objects whose ID starts with the given prefix
    ///
    /// Prefixes shorter than four characters never match, to keep short
    /// accidental inputs from resolving.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.len() < MIN_PREFIX_LENGTH || !ObjectId::is_hex_prefix(prefix) {
            return Ok(Vec::new());
        }
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();

            if file_name.starts_with(&prefix)
                && let Ok(oid) = ObjectId::try_parse(file_name)
            {
                matches.push(oid);
            }
        }

        matches.sort();
        Ok(matches)
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
