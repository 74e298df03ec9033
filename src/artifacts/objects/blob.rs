//! Blob object
//!
//! Blobs store file content. They carry only the raw bytes, without the file name
//! (names live in trees).
//!
//! ## Format
//!
//! On disk: the raw file content, byte for byte

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Blob object representing file content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// File content
    content: Bytes,
}

impl Blob {
    /// Get the file content
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Compare this blob with other content line by line
    ///
    /// Lines are compared including their terminators, so a missing or extra
    /// trailing newline, or any extra line on either side, counts as a change.
    pub fn differs_from(&self, other: &[u8]) -> bool {
        let mut ours = self.content.split_inclusive(|byte| *byte == b'\n');
        let mut theirs = other.split_inclusive(|byte| *byte == b'\n');

        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return false,
                (Some(left), Some(right)) if left == right => continue,
                _ => return true,
            }
        }
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(content.into()))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
