//! PostgreSQL books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookRepository;
use crate::{
    error::AppResult,
    models::book::{Book, BookId},
};

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn insert(&self, book: &Book) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, available_copies)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, available_copies
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.available_copies)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn save(&self, book: Book) -> AppResult<Book> {
        let Some(id) = book.id else {
            return self.insert(&book).await;
        };

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $1, author = $2, available_copies = $3
            WHERE id = $4
            RETURNING id, title, author, available_copies
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.available_copies)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(row) => Ok(row),
            None => {
                tracing::debug!(book_id = id, "row vanished before save, inserting");
                self.insert(&book).await
            }
        }
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, available_copies FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: BookId) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, available_copies FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: BookId) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: BookId) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str = include_str!("../../migrations/20240101000000_create_books.sql");

    #[test]
    fn test_schema_enforces_payload_rules() {
        assert!(SCHEMA.contains("title TEXT NOT NULL CHECK (title <> '')"));
        assert!(SCHEMA.contains("author TEXT NOT NULL CHECK (author <> '')"));
        assert!(SCHEMA.contains("CHECK (available_copies >= 0)"));
    }
}
