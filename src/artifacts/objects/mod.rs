//! kit object types and operations
//!
//! All content is stored as objects identified by SHA-1 digests. There are three types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (kinds, object IDs, names)
//! - **Commit**: Snapshot record (tree, parent, time, message)
//!
//! The stored body of an object is plain text (or raw bytes for blobs) without any
//! header; the identifier is computed over `<type> <size>\0<body>` so that a blob and
//! a tree with identical bodies never share an identifier.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object ID as printed by `log --oneline`
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

/// Minimum length accepted when resolving an abbreviated object ID
pub const MIN_PREFIX_LENGTH: usize = 4;
