use std::sync::Arc;

use uuid::Uuid;

use super::{
    model::{NewNote, Note, NoteChanges, NoteError},
    repo::NoteRepo,
};

/// Ownership-scoped note operations. Input is validated here, before the
/// repository is reached, and a note owned by someone else is reported as
/// [`NoteError::NotFound`].
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepo>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Note>, NoteError> {
        Ok(self.repo.list_owned(owner).await?)
    }

    pub async fn get(&self, owner: Uuid, note_id: Uuid) -> Result<Note, NoteError> {
        self.repo
            .get_owned(owner, note_id)
            .await?
            .ok_or(NoteError::NotFound)
    }

    pub async fn create(
        &self,
        owner: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Note, NoteError> {
        let draft = NewNote::parse(title, content)?;
        let note = self.repo.create(owner, draft).await?;
        tracing::debug!(note_id = %note.id, %owner, "note created");
        Ok(note)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        note_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Note, NoteError> {
        let changes = NoteChanges::parse(title, content);
        if changes.is_empty() {
            tracing::debug!(%note_id, %owner, "update carries no field changes");
        }
        self.repo
            .update_owned(owner, note_id, changes)
            .await?
            .ok_or(NoteError::NotFound)
    }

    pub async fn delete(&self, owner: Uuid, note_id: Uuid) -> Result<(), NoteError> {
        if !self.repo.delete_owned(owner, note_id).await? {
            return Err(NoteError::NotFound);
        }
        tracing::debug!(%note_id, %owner, "note deleted");
        Ok(())
    }
}
