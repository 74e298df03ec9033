use crate::METADATA_DIR;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::errors::KitError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open a repository rooted at `path`, creating the directory if needed
    ///
    /// The metadata directory itself is only created by `init`.
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);

        let index = Index::new(metadata_path.join("index").into_boxed_path());
        let database = Database::new(metadata_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    /// Open the repository enclosing `start`
    ///
    /// Walks upward from `start` until a directory holding the metadata directory
    /// is found; fails with [`KitError::NotARepository`] otherwise.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start.canonicalize()?;

        let root = start
            .ancestors()
            .find(|dir| dir.join(METADATA_DIR).is_dir())
            .ok_or(KitError::NotARepository)?;
        debug!(root = %root.display(), "discovered repository");

        Self::new(&root.to_string_lossy(), writer)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> Box<Path> {
        self.path.join(METADATA_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Run `body` against the loaded index and flush it afterwards
    ///
    /// The index is written back once the body returns, whether it succeeded or
    /// not, unless nothing changed. The body's result wins over a flush error.
    pub async fn with_index<T>(
        &self,
        body: impl FnOnce(&mut Index) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate(self.workspace())?;
        let result = body(&mut index);
        let flushed = if index.has_changed() {
            index.write_updates()
        } else {
            Ok(())
        };

        let value = result?;
        flushed?;

        Ok(value)
    }

    /// Resolve a commit given as a full ID or an unambiguous prefix
    ///
    /// Only commits count as candidates for a prefix. Fails with
    /// [`KitError::UnknownCommit`] when no commit matches, several commits match, or
    /// a full ID does not name a commit.
    pub fn resolve_commit(&self, target: &str) -> anyhow::Result<ObjectId> {
        let unknown = || KitError::UnknownCommit(target.to_string());

        let oid = if target.len() == OBJECT_ID_LENGTH {
            ObjectId::try_parse(target.to_string()).map_err(|_| unknown())?
        } else {
            let mut candidates = self
                .database()
                .find_objects_by_prefix(target)?
                .into_iter()
                .filter(|oid| self.database().parse_object_as_commit(oid).is_ok())
                .collect::<Vec<_>>();
            if candidates.len() != 1 {
                debug!(target, matches = candidates.len(), "prefix did not resolve");
                return Err(unknown().into());
            }
            candidates.remove(0)
        };

        if !self.database().exists(&oid) || self.database().parse_object_as_commit(&oid).is_err()
        {
            return Err(unknown().into());
        }

        Ok(oid)
    }
}
