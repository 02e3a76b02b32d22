//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookId, BookPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Persist a new book and return it with its assigned id
    pub async fn create(&self, payload: BookPayload) -> AppResult<Book> {
        let book = self.repository.save(Book::unsaved(payload)).await?;
        tracing::info!(book_id = ?book.id, title = %book.title, "book created");
        Ok(book)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.find_all().await
    }

    /// Absence is not an error here; callers decide how to surface it
    pub async fn get_by_id(&self, id: BookId) -> AppResult<Option<Book>> {
        self.repository.find_by_id(id).await
    }

    /// Overwrite title, author and available copies of an existing book.
    ///
    /// Unconditional read-then-write: concurrent updates to the same id are
    /// last-writer-wins.
    pub async fn update(&self, id: BookId, patch: BookPayload) -> AppResult<Book> {
        let mut book = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book not found with id: {}", id)))?;

        book.apply(patch);
        let book = self.repository.save(book).await?;
        tracing::info!(book_id = id, "book updated");
        Ok(book)
    }

    /// Idempotent: deleting an unknown id succeeds
    pub async fn delete(&self, id: BookId) -> AppResult<()> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}
