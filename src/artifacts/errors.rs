//! Domain errors
//!
//! Every error a command can report to the user without failing the process. They
//! travel inside `anyhow::Error` and are recognised at the command boundary with
//! `downcast_ref`; anything else is an unexpected failure.

use crate::METADATA_DIR;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    /// No metadata directory was found walking upward from the working directory
    #[error("not a kit repository (or any of the parent directories): {}", METADATA_DIR)]
    NotARepository,
    /// A commit was requested while nothing is staged
    #[error("nothing staged for commit")]
    NothingStaged,
    /// A checkout or revert target does not name a stored commit
    #[error("commit {0} does not exist")]
    UnknownCommit(String),
    /// A revert target exists but is not part of the current history
    #[error("commit {0} is not an ancestor of HEAD")]
    NotAnAncestor(String),
    /// A checkout would overwrite untracked files
    #[error("local changes would be overwritten by checkout")]
    UncommittedChanges(Vec<PathBuf>),
    /// A referenced object has no backing file
    #[error("object {0} is missing from the object store")]
    MissingObject(ObjectId),
    /// A stored object could not be parsed as the expected kind
    #[error("object {oid} is corrupt: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },
    /// The index file could not be parsed
    #[error("index file is corrupt: {0}")]
    CorruptIndex(String),
}

impl KitError {
    /// Whether the error is part of normal command flow (reported, exit code 0)
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            KitError::NotARepository
                | KitError::NothingStaged
                | KitError::UnknownCommit(_)
                | KitError::NotAnAncestor(_)
                | KitError::UncommittedChanges(_)
        )
    }

    /// Whether `error` carries a [`KitError::MissingObject`]
    pub fn is_missing_object(error: &anyhow::Error) -> bool {
        matches!(
            error.downcast_ref::<KitError>(),
            Some(KitError::MissingObject(_))
        )
    }

    /// Write the user-facing report for this error
    pub fn report(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        match self {
            KitError::NothingStaged => writeln!(writer, "Please add files first to commit"),
            KitError::UncommittedChanges(paths) => {
                writeln!(
                    writer,
                    "fatal: Your local changes to the following files would be overwritten by checkout:"
                )?;
                for path in paths {
                    writeln!(writer, "   {}", path.display())?;
                }
                writeln!(writer, "Aborting")
            }
            other => writeln!(writer, "fatal: {}", other),
        }
    }
}
