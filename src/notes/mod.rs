pub mod http;
pub mod memory;
pub mod model;
pub mod repo;
pub mod service;

pub use memory::MemoryNoteRepo;
pub use model::{NewNote, Note, NoteChanges, NoteError};
pub use repo::{NoteRepo, PgNoteRepo};
pub use service::NoteService;
