//! Tree object
//!
//! Trees represent one directory level of a snapshot. They contain entries for files
//! (blobs) and subdirectories (other trees).
//!
//! ## Format
//!
//! On disk, one line per entry, sorted by name: `<kind> <object-id> <name>`
//!
//! Names may contain spaces since the name is always the last field of the line.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Single named reference inside a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub oid: ObjectId,
    pub kind: ObjectType,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.kind == ObjectType::Tree
    }
}

/// Tree object representing a directory snapshot
///
/// Entries are keyed by name, which keeps them unique within one tree and makes the
/// serialized form deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Add an entry, failing if the name is already taken
    pub fn add_entry(&mut self, name: String, entry: TreeEntry) -> anyhow::Result<()> {
        if name.is_empty() || name.contains(['/', '\n']) {
            anyhow::bail!("Invalid tree entry name: {:?}", name);
        }
        if self.entries.contains_key(&name) {
            anyhow::bail!("Duplicate tree entry name: {}", name);
        }

        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn entry(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|(name, entry)| format!("{} {} {}\n", entry.kind, entry.oid, name))
            .collect::<String>();

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut tree = Tree::default();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let mut fields = line.splitn(3, ' ');
            let kind = fields.next().context("Invalid tree entry: missing kind")?;
            let oid = fields
                .next()
                .context("Invalid tree entry: missing object id")?;
            let name = fields.next().context("Invalid tree entry: missing name")?;

            let kind = ObjectType::try_from(kind)?;
            if kind == ObjectType::Commit {
                anyhow::bail!("Invalid tree entry: commits cannot be tree entries");
            }

            let oid = ObjectId::try_parse(oid.to_string())?;
            tree.add_entry(name.to_string(), TreeEntry::new(oid, kind))?;
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
