use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use regex::Regex;
use std::path::{Path, PathBuf};

// the path is greedy so that paths containing spaces survive
const ENTRY_LINE_REGEX: &str = r"^(?P<path>.+) (?P<stage>[0-9]+) (?P<oid>[0-9a-fA-F]{40})$";

/// Staging state of an index entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Content matches the last snapshot
    Unmodified,
    /// Content is queued for the next commit
    Staged,
    /// Present in the working tree but excluded from snapshots
    Untracked,
}

impl Stage {
    pub fn as_u8(&self) -> u8 {
        match self {
            Stage::Unmodified => 0,
            Stage::Staged => 1,
            Stage::Untracked => 2,
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> anyhow::Result<Self> {
        match value {
            0 => Ok(Stage::Unmodified),
            1 => Ok(Stage::Staged),
            2 => Ok(Stage::Untracked),
            _ => Err(anyhow::anyhow!("Invalid stage number: {}", value)),
        }
    }
}

/// Index entry
///
/// `path` is relative to the repository root and unique within the index.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub path: PathBuf,
    pub oid: ObjectId,
    pub stage: Stage,
}

impl IndexEntry {
    pub fn is_staged(&self) -> bool {
        self.stage == Stage::Staged
    }

    pub fn is_untracked(&self) -> bool {
        self.stage == Stage::Untracked
    }

    /// Path of the entry as written in the index file, always `/`-separated
    pub fn display_path(&self) -> String {
        self.path
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Serialize the entry as one index line (without the line terminator)
    pub fn to_line(&self) -> String {
        format!("{} {} {}", self.display_path(), self.stage.as_u8(), self.oid)
    }

    /// Parse one index line
    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let captures = Regex::new(ENTRY_LINE_REGEX)?
            .captures(line)
            .with_context(|| format!("Invalid index entry: {:?}", line))?;

        let path = Path::new(&captures["path"]).to_path_buf();
        let stage = captures["stage"]
            .parse::<u8>()
            .with_context(|| format!("Invalid stage number in index entry: {:?}", line))?;
        let stage = Stage::try_from(stage)?;
        let oid = ObjectId::try_parse(captures["oid"].to_string())?;

        Ok(Self::new(path, oid, stage))
    }
}
