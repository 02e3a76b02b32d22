//! In-memory books repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookRepository;
use crate::{
    error::AppResult,
    models::book::{Book, BookId},
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<BookId, Book>,
    last_id: BookId,
}

impl Table {
    fn next_id(&mut self) -> BookId {
        self.last_id += 1;
        self.last_id
    }
}

/// Process-local store with the same semantics as the PostgreSQL table.
/// Identifiers start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryBookRepository {
    table: RwLock<Table>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn save(&self, mut book: Book) -> AppResult<Book> {
        let mut table = self.table.write().await;
        let id = match book.id {
            Some(id) if table.rows.contains_key(&id) => id,
            _ => table.next_id(),
        };
        book.id = Some(id);
        table.rows.insert(id, book.clone());
        Ok(book)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> AppResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: BookId) -> AppResult<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: BookId) -> AppResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }
}
