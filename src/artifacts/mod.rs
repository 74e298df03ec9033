//! kit data structures and algorithms
//!
//! - `core`: Shared utilities (pager wrapper)
//! - `errors`: Domain error taxonomy reported at the command boundary
//! - `history`: Commit traversal and the reachability walk used by revert
//! - `index`: Index entries and stage numbers
//! - `objects`: Object types (blob, tree, commit) and their identifiers
//! - `snapshot`: Tree snapshot builder with structural sharing
//! - `status`: Per-file status shown by `status`

pub mod core;
pub mod errors;
pub mod history;
pub mod index;
pub mod objects;
pub mod snapshot;
pub mod status;
