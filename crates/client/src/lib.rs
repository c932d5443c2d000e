//! Client side of the shelf book catalog.
//!
//! [`Controller`] owns everything the catalog screen shows: the book list,
//! the loading flag, the sticky error, and the popover form with its draft
//! buffer and [`Placement`]. It talks to the server through the [`BooksApi`]
//! port; [`HttpBooksApi`] is the real implementation.

pub mod api;
pub mod controller;
pub mod placement;

pub use api::{BooksApi, ClientError, HttpBooksApi};
pub use controller::{
    CatalogView, Confirm, Control, Controller, Field, FormBuffer, FormMode, FormView,
    PointerTarget, View,
};
pub use placement::{Layout, Placement, Rect, Viewport};
