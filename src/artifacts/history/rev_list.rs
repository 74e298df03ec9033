use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Commits from a starting commit down to the root, following parent links
///
/// Each step reads one commit from the store. A read failure is yielded once and
/// ends the walk.
#[derive(Clone, new)]
pub struct RevList<'d> {
    database: &'d Database,
    next_commit_oid: Option<ObjectId>,
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                self.next_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
