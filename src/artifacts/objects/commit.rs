//! Commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - The parent commit ID (empty for the root commit)
//! - The commit time in unix seconds
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! tree <tree-id>
//! parent <parent-id>
//! time <unix-seconds>
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, Local, Utc};
use std::io::BufRead;

/// Environment variable pinning the commit time
pub const COMMIT_DATE_ENV: &str = "KIT_COMMIT_DATE";

/// Commit object
///
/// Commits form a singly-linked list through their parent IDs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit ID (None for the root commit)
    parent: Option<ObjectId>,
    /// Commit time
    timestamp: DateTime<Utc>,
    /// Commit message
    message: String,
}

impl Commit {
    pub fn new(
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        timestamp: DateTime<Utc>,
        message: String,
    ) -> Self {
        Commit {
            tree_oid,
            parent,
            timestamp,
            message,
        }
    }

    /// Resolve the commit time from the environment
    ///
    /// Reads `KIT_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls back
    /// to the current time when it is unset or unparsable.
    pub fn timestamp_from_env() -> DateTime<Utc> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .map(|timestamp| timestamp.with_timezone(&Utc))
            .unwrap_or_else(Utc::now)
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let parent = self.parent.as_ref().map(ObjectId::as_ref).unwrap_or("");

        let content = format!(
            "tree {}\nparent {}\ntime {}\n{}\n",
            self.tree_oid,
            parent,
            self.timestamp.timestamp(),
            self.message
        );

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut lines = reader.lines();

        let tree_line = lines
            .next()
            .context("Invalid commit object: missing tree line")??;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .context("Invalid commit object: invalid tree line")?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        let parent_line = lines
            .next()
            .context("Invalid commit object: missing parent line")??;
        let parent = parent_line
            .strip_prefix("parent")
            .context("Invalid commit object: invalid parent line")?
            .trim();
        let parent = match parent {
            "" => None,
            parent => Some(ObjectId::try_parse(parent.to_string())?),
        };

        let time_line = lines
            .next()
            .context("Invalid commit object: missing time line")??;
        let seconds = time_line
            .strip_prefix("time ")
            .context("Invalid commit object: invalid time line")?
            .parse::<i64>()
            .context("Invalid commit object: invalid timestamp")?;
        let timestamp = DateTime::from_timestamp(seconds, 0)
            .context("Invalid commit object: timestamp out of range")?;

        let message = lines.collect::<Result<Vec<_>, _>>()?.join("\n");

        Ok(Self::new(tree_oid, parent, timestamp, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
