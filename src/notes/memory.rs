use std::collections::HashMap;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::StoreError;

use super::{
    model::{NewNote, Note, NoteChanges},
    repo::NoteRepo,
};

/// Process-local note storage with the same ownership semantics as Postgres.
#[derive(Default)]
pub struct MemoryNoteRepo {
    notes: RwLock<HashMap<Uuid, Note>>,
}

impl MemoryNoteRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepo for MemoryNoteRepo {
    async fn list_owned(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        let notes = self.notes.read().await;
        let mut owned: Vec<Note> = notes
            .values()
            .filter(|n| n.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn get_owned(&self, owner: Uuid, note_id: Uuid) -> Result<Option<Note>, StoreError> {
        let notes = self.notes.read().await;
        Ok(notes
            .get(&note_id)
            .filter(|n| n.owner == owner)
            .cloned())
    }

    async fn create(&self, owner: Uuid, note: NewNote) -> Result<Note, StoreError> {
        let now = OffsetDateTime::now_utc();
        let note = Note {
            id: Uuid::new_v4(),
            owner,
            title: note.title,
            content: note.content,
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        note_id: Uuid,
        changes: NoteChanges,
    ) -> Result<Option<Note>, StoreError> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.get_mut(&note_id).filter(|n| n.owner == owner) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            note.title = title;
        }
        if let Some(content) = changes.content {
            note.content = content;
        }
        note.updated_at = OffsetDateTime::now_utc().max(note.updated_at + Duration::nanoseconds(1));

        Ok(Some(note.clone()))
    }

    async fn delete_owned(&self, owner: Uuid, note_id: Uuid) -> Result<bool, StoreError> {
        let mut notes = self.notes.write().await;
        match notes.get(&note_id) {
            Some(note) if note.owner == owner => {
                notes.remove(&note_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
