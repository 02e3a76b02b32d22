//! Data models for Bookshelf

pub mod book;
pub mod principal;

pub use book::{Book, BookId, BookPayload};
pub use principal::{Principal, Role};
