//! Index (staging area) data structures
//!
//! ## File Format
//!
//! ```text
//! <entry-count> <format-tag>
//! <path> <stage-number> <object-id>
//! ...
//! ```
//!
//! Stage numbers: 0 = unmodified, 1 = staged, 2 = untracked.

pub mod index_entry;

/// Format tag written after the entry count on the first line
pub const FORMAT_TAG: &str = "kit_index_v1";
