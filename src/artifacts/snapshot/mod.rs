//! Tree snapshots
//!
//! Turns the flat list of index entries into the hierarchy of tree objects a
//! commit points at, re-referencing every directory the parent commit already
//! stored unchanged.

pub mod tree_builder;
