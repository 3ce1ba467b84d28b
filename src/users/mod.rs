pub mod memory;
pub mod repo;

pub use memory::MemoryUserRepo;
pub use repo::{PgUserRepo, User, UserCredentials, UserRepo};
