//! Core repository components
//!
//! This module contains the building blocks of a kit repository:
//!
//! - `database`: Object store for blobs, trees, and commits
//! - `index`: Staging area tracking working-tree paths and their stage
//! - `refs`: The head pointer (`HEAD` and `refs/heads/master`)
//! - `repository`: Repository handle coordinating all areas
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
