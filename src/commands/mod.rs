//! Command implementations
//!
//! Every user-facing command is an `impl Repository` block in `porcelain`. Commands
//! write their output through [`crate::areas::repository::Repository::writer`] and
//! return domain failures as [`crate::artifacts::errors::KitError`] values.

pub mod porcelain;
