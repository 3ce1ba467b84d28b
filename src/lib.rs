use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::TokenKeys,
    config::{Config, Environment},
    notes::{MemoryNoteRepo, NoteRepo, NoteService, PgNoteRepo},
    users::{MemoryUserRepo, PgUserRepo, UserRepo},
};

pub mod app;
pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod extractors;
pub mod notes;
pub mod store;
pub mod users;

#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub users: Arc<dyn UserRepo>,
    pub tokens: TokenKeys,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        notes: Arc<dyn NoteRepo>,
        users: Arc<dyn UserRepo>,
        tokens: TokenKeys,
        environment: Environment,
    ) -> Self {
        Self {
            notes: NoteService::new(notes),
            users,
            tokens,
            environment,
        }
    }

    pub fn postgres(db: PgPool, config: &Config) -> Self {
        Self::new(
            Arc::new(PgNoteRepo::new(db.clone())),
            Arc::new(PgUserRepo::new(db)),
            TokenKeys::from_secret(&config.jwt_secret, config.token_ttl),
            config.environment,
        )
    }

    /// State backed by process memory, nothing survives a restart.
    pub fn in_memory(tokens: TokenKeys, environment: Environment) -> Self {
        Self::new(
            Arc::new(MemoryNoteRepo::new()),
            Arc::new(MemoryUserRepo::new()),
            tokens,
            environment,
        )
    }
}
