//! Wire types shared by the shelf server and its clients.
//!
//! Everything that crosses `/api/books` lives here: the [`Book`] record, the
//! uniform [`Envelope`] wrapper, and the request payloads together with the
//! validation that turns them into domain values.

pub mod book;
pub mod envelope;
pub mod request;

pub use book::{Book, BookId, BookPatch, NewBook};
pub use envelope::Envelope;
pub use request::{
    CreateBookRequest, DeleteBookRequest, IdInput, UpdateBookRequest, ValidationError,
};

/// Path of the single book resource.
pub const BOOKS_PATH: &str = "/api/books";
