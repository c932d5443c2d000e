//! Data access for the `book` table.

use async_trait::async_trait;
use shelf_contracts::Book;
use shelf_db::DbPool;
use thiserror::Error;

use super::models::{BookId, BookPatch, BookRecord, NewBook};

/// Store failures, classified so the HTTP layer can tell a missing row from
/// everything else.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book {0} not found")]
    NotFound(BookId),

    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ordered by id
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    /// Persist a new book and return it with its assigned id
    async fn create(&self, book: &NewBook) -> Result<Book, StoreError>;

    /// Apply `patch` to the book and return the stored result
    async fn update(&self, id: BookId, patch: &BookPatch) -> Result<Book, StoreError>;

    /// Remove the book and return what was removed
    async fn delete(&self, id: BookId) -> Result<Book, StoreError>;
}

/// [`BookStore`] backed by the SQLite pool.
#[derive(Clone)]
pub struct SqlBookStore {
    pool: DbPool,
}

impl SqlBookStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for SqlBookStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let records = sqlx::query_as::<_, BookRecord>(
            "SELECT id, title, author, genre FROM book ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(BookRecord::into_domain).collect())
    }

    async fn create(&self, book: &NewBook) -> Result<Book, StoreError> {
        let record = sqlx::query_as::<_, BookRecord>(
            "INSERT INTO book (title, author, genre) VALUES (?, ?, ?)
             RETURNING id, title, author, genre",
        )
        .bind(book.title())
        .bind(book.author())
        .bind(book.genre())
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into_domain())
    }

    async fn update(&self, id: BookId, patch: &BookPatch) -> Result<Book, StoreError> {
        // An empty patch still has to prove the row exists.
        let record = sqlx::query_as::<_, BookRecord>(
            "UPDATE book
             SET title = COALESCE(?, title),
                 author = COALESCE(?, author),
                 genre = COALESCE(?, genre)
             WHERE id = ?
             RETURNING id, title, author, genre",
        )
        .bind(patch.title.as_deref())
        .bind(patch.author.as_deref())
        .bind(patch.genre.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record
            .map(BookRecord::into_domain)
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: BookId) -> Result<Book, StoreError> {
        let record = sqlx::query_as::<_, BookRecord>(
            "DELETE FROM book WHERE id = ? RETURNING id, title, author, genre",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record
            .map(BookRecord::into_domain)
            .ok_or(StoreError::NotFound(id))
    }
}
