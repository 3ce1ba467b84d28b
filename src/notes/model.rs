use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("title and content are required")]
    InvalidInput,
    #[error("note not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A validated note ready to be stored. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl NewNote {
    pub fn parse(title: Option<&str>, content: Option<&str>) -> Result<Self, NoteError> {
        let title = non_blank(title).ok_or(NoteError::InvalidInput)?;
        let content = non_blank(content).ok_or(NoteError::InvalidInput)?;
        Ok(Self { title, content })
    }
}

/// Partial update. A field that is absent, empty or whitespace-only is left as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteChanges {
    pub fn parse(title: Option<&str>, content: Option<&str>) -> Self {
        Self {
            title: non_blank(title),
            content: non_blank(content),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_trims_both_fields() {
        let note = NewNote::parse(Some("  Shopping "), Some("\tmilk, eggs\n")).unwrap();
        assert_eq!(note.title, "Shopping");
        assert_eq!(note.content, "milk, eggs");
    }

    #[test]
    fn new_note_rejects_blank_or_missing_fields() {
        let cases = [
            (None, Some("body")),
            (Some("title"), None),
            (Some(""), Some("body")),
            (Some("title"), Some("   ")),
            (Some(" \n "), Some("")),
        ];
        for (title, content) in cases {
            assert!(
                matches!(NewNote::parse(title, content), Err(NoteError::InvalidInput)),
                "expected rejection for {title:?} / {content:?}"
            );
        }
    }

    #[test]
    fn blank_changes_are_dropped() {
        let changes = NoteChanges::parse(Some("   "), Some(" new body "));
        assert_eq!(changes.title, None);
        assert_eq!(changes.content.as_deref(), Some("new body"));
        assert!(NoteChanges::parse(Some(""), None).is_empty());
    }
}
