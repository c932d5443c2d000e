use shelf_contracts::Book;
use sqlx::FromRow;

pub use shelf_contracts::{
    BookId, BookPatch, CreateBookRequest, DeleteBookRequest, NewBook, UpdateBookRequest,
};

/// Row shape of the `book` table.
#[derive(Debug, FromRow)]
pub(crate) struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl BookRecord {
    pub fn into_domain(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            genre: self.genre,
        }
    }
}
