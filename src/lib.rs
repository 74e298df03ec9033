//! kit: a minimal local version-control storage engine
//!
//! The crate snapshots a working directory into an immutable object graph stored
//! under `.kit/objects`, keeps a staging index in `.kit/index` and a single branch
//! head in `.kit/refs/heads/master`.
//!
//! - `areas`: the on-disk areas of a repository (object store, index, refs, workspace)
//! - `artifacts`: value types and algorithms (objects, index entries, snapshots, history)
//! - `commands`: user-facing commands implemented on [`areas::repository::Repository`]

pub mod areas;
pub mod artifacts;
pub mod commands;

/// Name of the metadata directory located at the repository root
pub const METADATA_DIR: &str = ".kit";

/// Name of the single branch every repository works on
pub const DEFAULT_BRANCH: &str = "master";
