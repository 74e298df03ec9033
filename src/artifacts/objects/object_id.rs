//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They name every stored
//! object and double as the object's file name under `.kit/objects/`.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use std::path::PathBuf;

/// Object identifier (SHA-1 hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Check whether a string could be an (abbreviated) object ID
    pub fn is_hex_prefix(prefix: &str) -> bool {
        !prefix.is_empty()
            && prefix.len() <= OBJECT_ID_LENGTH
            && prefix.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// File name of the object inside the objects directory
    ///
    /// The store is flat, so this is simply the identifier itself.
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Get abbreviated form of the object ID
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
