//! Book API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookId, BookPayload},
};

use super::AuthenticatedUser;

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    tracing::debug!(username = %principal.username, "listing books");
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_principal): AuthenticatedUser,
    Path(id): Path<BookId>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .books
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book not found with id: {}", id)))?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("basic_auth" = [])),
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid book", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<Book>)> {
    payload.validate()?;
    tracing::debug!(username = %principal.username, "creating book");
    let book = state.services.books.create(payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Replace title, author and available copies of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid book", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Path(id): Path<BookId>,
    Json(payload): Json<BookPayload>,
) -> AppResult<Json<Book>> {
    payload.validate()?;
    tracing::debug!(username = %principal.username, book_id = id, "updating book");
    let book = state.services.books.update(id, payload).await?;
    Ok(Json(book))
}

/// Delete a book (succeeds for unknown ids)
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Path(id): Path<BookId>,
) -> AppResult<StatusCode> {
    tracing::debug!(username = %principal.username, book_id = id, "deleting book");
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
