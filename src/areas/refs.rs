//! Head pointer
//!
//! kit keeps a single branch. Two files make up the head pointer:
//!
//! - `HEAD`: one line holding the ref path, always `refs/heads/master`
//! - `refs/heads/master`: one line holding the last commit ID, empty before the first commit

use crate::DEFAULT_BRANCH;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Regex pattern a ref path stored in HEAD must match
const REF_PATH_REGEX: &str = r"^refs/heads/[A-Za-z0-9._-]+$";

/// Name of the HEAD file
pub const HEAD_REF_NAME: &str = "HEAD";

/// Head pointer manager
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.kit`)
    path: Box<Path>,
}

impl Refs {
    /// Write a fresh HEAD and an empty default branch
    pub fn init(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.heads_path())
            .context("Failed to create refs/heads directory")?;

        let default_ref = Self::default_ref();
        self.update_ref_file(&self.head_path(), &default_ref)?;

        let branch_path = self.path.join(&default_ref);
        if !branch_path.exists() {
            self.update_ref_file(&branch_path, "")?;
        }

        Ok(())
    }

    /// Get the ref path HEAD points at
    ///
    /// Falls back to the default branch when HEAD is empty.
    pub fn current_ref(&self) -> anyhow::Result<String> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(Self::default_ref());
        }

        if !regex::Regex::new(REF_PATH_REGEX)?.is_match(content) {
            anyhow::bail!("invalid ref in HEAD: {}", content);
        }

        Ok(content.to_string())
    }

    /// Short name of the branch HEAD points at
    pub fn current_branch(&self) -> anyhow::Result<String> {
        let current_ref = self.current_ref()?;

        Ok(current_ref
            .rsplit('/')
            .next()
            .unwrap_or(DEFAULT_BRANCH)
            .to_string())
    }

    /// Read the last commit ID
    ///
    /// # Returns
    ///
    /// None when the branch has no commits yet
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.path.join(self.current_ref()?);
        if !ref_path.exists() {
            return Ok(None);
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&ref_path)
            .with_context(|| format!("failed to open ref file at {:?}", ref_path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ObjectId::try_parse(content.to_string())?))
        }
    }

    /// Point the branch at a new commit
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let ref_path = self.path.join(self.current_ref()?);
        self.update_ref_file(&ref_path, oid.as_ref())?;
        debug!(oid = %oid, "moved head");

        Ok(())
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn default_ref() -> String {
        format!("refs/heads/{}", DEFAULT_BRANCH)
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }
}
