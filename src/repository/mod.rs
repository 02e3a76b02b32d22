//! Persistence Gateway for book records

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::book::{Book, BookId},
};

pub use books::PgBookRepository;
pub use memory::InMemoryBookRepository;

/// Generic create/read/update/delete capability over book records.
///
/// Implementations own their concurrency control; callers hold no locks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a book without an id, or overwrite the row matching its id.
    /// A book whose id no longer exists is inserted under a fresh id.
    async fn save(&self, book: Book) -> AppResult<Book>;

    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: BookId) -> AppResult<Option<Book>>;

    /// Remove the row if present; absent ids are not an error.
    async fn delete_by_id(&self, id: BookId) -> AppResult<()>;

    async fn exists_by_id(&self, id: BookId) -> AppResult<bool>;
}

/// Shared handle to whichever store the process was configured with
pub type Repository = Arc<dyn BookRepository>;
