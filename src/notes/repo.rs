use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::StoreError;

use super::model::{NewNote, Note, NoteChanges};

/// Note persistence. Every lookup and write is scoped to `owner`.
#[async_trait]
pub trait NoteRepo: Send + Sync {
    async fn list_owned(&self, owner: Uuid) -> Result<Vec<Note>, StoreError>;

    async fn get_owned(&self, owner: Uuid, note_id: Uuid) -> Result<Option<Note>, StoreError>;

    async fn create(&self, owner: Uuid, note: NewNote) -> Result<Note, StoreError>;

    /// Returns `None` when no note with this id belongs to `owner`.
    async fn update_owned(
        &self,
        owner: Uuid,
        note_id: Uuid,
        changes: NoteChanges,
    ) -> Result<Option<Note>, StoreError>;

    /// Returns `false` when no note with this id belongs to `owner`.
    async fn delete_owned(&self, owner: Uuid, note_id: Uuid) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgNoteRepo {
    db: PgPool,
}

impl PgNoteRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepo for PgNoteRepo {
    async fn list_owned(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        let rows = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, owner, title, content, created_at, updated_at
            FROM notes
            WHERE owner = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn get_owned(&self, owner: Uuid, note_id: Uuid) -> Result<Option<Note>, StoreError> {
        let maybe_note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, owner, title, content, created_at, updated_at
            FROM notes
            WHERE id = $1 AND owner = $2
            "#,
        )
        .bind(note_id)
        .bind(owner)
        .fetch_optional(&self.db)
        .await?;

        Ok(maybe_note)
    }

    async fn create(&self, owner: Uuid, note: NewNote) -> Result<Note, StoreError> {
        let row = sqlx::query_as::<_, Note>(
            r#"
            WITH ts AS (SELECT clock_timestamp() AS at)
            INSERT INTO notes (owner, title, content, created_at, updated_at)
            SELECT $1, $2, $3, ts.at, ts.at FROM ts
            RETURNING id, owner, title, content, created_at, updated_at
            "#,
        )
        .bind(owner)
        .bind(note.title)
        .bind(note.content)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        note_id: Uuid,
        changes: NoteChanges,
    ) -> Result<Option<Note>, StoreError> {
        // updated_at must move forward even if the clock has not ticked past
        // the previous value at microsecond precision.
        let maybe_note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = COALESCE($3, title),
                content = COALESCE($4, content),
                updated_at = GREATEST(clock_timestamp(), updated_at + interval '1 microsecond')
            WHERE id = $1 AND owner = $2
            RETURNING id, owner, title, content, created_at, updated_at
            "#,
        )
        .bind(note_id)
        .bind(owner)
        .bind(changes.title)
        .bind(changes.content)
        .fetch_optional(&self.db)
        .await?;

        Ok(maybe_note)
    }

    async fn delete_owned(&self, owner: Uuid, note_id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id = $1 AND owner = $2
            "#,
        )
        .bind(note_id)
        .bind(owner)
        .execute(&self.db)
        .await?;

        Ok(res.rows_affected() == 1)
    }
}
