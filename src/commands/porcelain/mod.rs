//! Porcelain commands
//!
//! - `init`: Create an empty repository
//! - `add`: Stage files for commit
//! - `rm`: Unstage files and drop their stored content
//! - `commit`: Snapshot the staged files
//! - `log`: Show the commit history
//! - `status`: Show staged and untracked files
//! - `checkout`: Restore the working tree to a commit
//! - `revert`: Discard every commit newer than a target

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod revert;
pub mod rm;
pub mod status;
