pub mod http;
pub mod token;

pub use token::{IssuedToken, TokenKeys};
