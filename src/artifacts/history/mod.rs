//! Commit history
//!
//! - `rev_list`: Lazy walk from a commit down to the root commit
//! - `gc`: Mark-and-sweep deletion of the objects only discarded commits reach

pub mod gc;
pub mod rev_list;
