use crate::artifacts::index::index_entry::{IndexEntry, Stage};
use colored::{ColoredString, Colorize};

/// How a path shows up in `status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileStatus {
    /// Queued for the next commit
    Staged,
    /// Present in the working tree, excluded from snapshots
    Untracked,
}

impl FileStatus {
    /// Status of an index entry, None when it has nothing to report
    pub fn of(entry: &IndexEntry) -> Option<Self> {
        match entry.stage {
            Stage::Unmodified => None,
            Stage::Staged => Some(FileStatus::Staged),
            Stage::Untracked => Some(FileStatus::Untracked),
        }
    }

    /// Two-column code used by `status --porcelain`
    pub fn porcelain_code(&self) -> &'static str {
        match self {
            FileStatus::Staged => "A ",
            FileStatus::Untracked => "??",
        }
    }

    /// Path as printed in the long format, colored by section
    pub fn paint(&self, path: &str) -> ColoredString {
        match self {
            FileStatus::Staged => path.green(),
            FileStatus::Untracked => path.red(),
        }
    }
}

impl From<&FileStatus> for &str {
    fn from(status: &FileStatus) -> Self {
        match status {
            FileStatus::Staged => "Changes to be committed:",
            FileStatus::Untracked => "Changes not staged for commit:",
        }
    }
}
