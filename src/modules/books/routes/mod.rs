//! Handlers for the single `/api/books` resource.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::{get, MethodFilter},
    Json, Router,
};
use shelf_contracts::{Book, Envelope};
use shelf_http::{ApiError, EnvelopeJson};

use super::models::{CreateBookRequest, DeleteBookRequest, UpdateBookRequest};
use super::store::{BookStore, StoreError};

/// Verbs served by `/api/books`, as sent in the `Allow` header.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";

pub const UPDATED_MESSAGE: &str = "Book updated successfully";
pub const DELETED_MESSAGE: &str = "Book deleted successfully";
pub const NOT_FOUND_MESSAGE: &str = "Book not found";

type SharedStore = Arc<dyn BookStore>;

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::not_found(NOT_FOUND_MESSAGE),
            StoreError::Database(source) => ApiError::Internal(source.into()),
        }
    }
}

/// Router for the books resource, mounted at the module root.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route(
            "/",
            get(list_books)
                .post(create_book)
                .put(update_book)
                .delete(delete_book)
                // HEAD would otherwise be answered by the GET handler.
                .on(MethodFilter::HEAD, method_not_allowed)
                .fallback(method_not_allowed),
        )
        .with_state(store)
}

async fn list_books(State(store): State<SharedStore>) -> Result<Json<Envelope<Vec<Book>>>, ApiError> {
    let books = store.list().await?;
    tracing::debug!(count = books.len(), "listed books");
    Ok(Json(Envelope::data(books)))
}

async fn create_book(
    State(store): State<SharedStore>,
    EnvelopeJson(request): EnvelopeJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<Envelope<Book>>), ApiError> {
    let new_book = request.validate()?;
    let book = store.create(&new_book).await?;

    tracing::info!(book_id = book.id, title = %book.title, "book created");
    Ok((StatusCode::CREATED, Json(Envelope::data(book))))
}

async fn update_book(
    State(store): State<SharedStore>,
    EnvelopeJson(request): EnvelopeJson<UpdateBookRequest>,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let (id, patch) = request.validate()?;
    let book = store.update(id, &patch).await?;

    tracing::info!(book_id = id, fields_changed = !patch.is_empty(), "book updated");
    Ok(Json(Envelope::data_with_message(book, UPDATED_MESSAGE)))
}

async fn delete_book(
    State(store): State<SharedStore>,
    EnvelopeJson(request): EnvelopeJson<DeleteBookRequest>,
) -> Result<Json<Envelope<Book>>, ApiError> {
    let id = request.validate()?;
    let book = store.delete(id).await?;

    tracing::info!(book_id = id, "book deleted");
    Ok(Json(Envelope::data_with_message(book, DELETED_MESSAGE)))
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(method, ALLOWED_METHODS)
}
