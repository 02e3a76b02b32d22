//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Store-assigned book identifier
pub type BookId = i64;

/// Book record as held by the Persistence Gateway.
///
/// `id` is `None` only for a book that has never been saved; every book
/// returned by a repository carries the identifier the store assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    /// Copies currently on the shelf
    pub available_copies: i32,
}

/// Book contents without an identifier.
///
/// Used both as the body of a create request and as the patch of an update.
/// An `id` field in the submitted JSON is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(range(min = 0, message = "Available copies cannot be negative"))]
    pub available_copies: i32,
}

impl Book {
    /// A book that has not been persisted yet
    pub fn unsaved(payload: BookPayload) -> Self {
        Self {
            id: None,
            title: payload.title,
            author: payload.author,
            available_copies: payload.available_copies,
        }
    }

    /// Overwrite the mutable fields from `patch`, leaving the identifier untouched
    pub fn apply(&mut self, patch: BookPayload) {
        self.title = patch.title;
        self.author = patch.author;
        self.available_copies = patch.available_copies;
    }
}
