//! State container for the catalog screen.
//!
//! Failures are coarse: any failed load, submit or delete sets a
//! sticky error and [`Controller::render`] shows nothing but that error until
//! the controller is rebuilt.

use shelf_contracts::{
    Book, BookId, CreateBookRequest, DeleteBookRequest, IdInput, UpdateBookRequest,
};

use crate::api::BooksApi;
use crate::placement::{self, Layout, Placement, Rect, Viewport};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this book?";
pub const EMPTY_CATALOG_TEXT: &str = "No books found";

const FETCH_FAILED: &str = "Failed to fetch books";
const ADD_FAILED: &str = "Failed to add book";
const UPDATE_FAILED: &str = "Failed to update book";
const DELETE_FAILED: &str = "Failed to delete book";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Genre,
}

/// Draft values of the form. Never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBuffer {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl FormBuffer {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Genre => &mut self.genre,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

/// Controls that open the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    AddButton,
    EditButton(BookId),
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Form,
    Control(Control),
    Elsewhere,
}

/// Interactive yes/no question, asked before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        (*self)(prompt)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub mode: FormMode,
    pub buffer: FormBuffer,
    pub placement: Placement,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub rows: Vec<Book>,
    pub form: Option<FormView>,
}

impl CatalogView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the screen shows, derived from controller state.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading,
    Error(String),
    Catalog(CatalogView),
}

#[derive(Debug, Clone, Copy)]
struct OpenForm {
    mode: FormMode,
    placement: Placement,
}

pub struct Controller<A> {
    api: A,
    books: Vec<Book>,
    loading: bool,
    error: Option<String>,
    buffer: FormBuffer,
    current: Option<Book>,
    form: Option<OpenForm>,
    viewport: Viewport,
}

impl<A: BooksApi> Controller<A> {
    pub fn new(api: A, viewport: Viewport) -> Self {
        Self {
            api,
            books: Vec::new(),
            loading: true,
            error: None,
            buffer: FormBuffer::default(),
            current: None,
            form: None,
            viewport,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn buffer(&self) -> &FormBuffer {
        &self.buffer
    }

    /// The record being edited, if the form is in edit mode.
    pub fn current(&self) -> Option<&Book> {
        self.current.as_ref()
    }

    pub fn is_form_visible(&self) -> bool {
        self.form.is_some()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.form.map(|form| form.placement)
    }

    /// Replace the list with the server's. Clears the loading flag either way.
    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(envelope) if envelope.success => {
                self.books = envelope.data.unwrap_or_default();
                tracing::debug!(count = self.books.len(), "catalog loaded");
            }
            Ok(envelope) => self.fail(envelope.error_or(FETCH_FAILED)),
            Err(err) => self.fail(err.to_string()),
        }
        self.loading = false;
    }

    /// Show an empty form for a new book, anchored to the add button.
    pub fn open_for_create(&mut self, trigger: Rect) {
        self.buffer = FormBuffer::default();
        self.current = None;
        self.show(FormMode::Add, trigger);
    }

    /// Show the form pre-filled with book `id`, anchored to its edit button.
    /// Returns `false` when the book is not in the list.
    pub fn open_for_edit(&mut self, id: BookId, trigger: Rect) -> bool {
        let Some(book) = self.books.iter().find(|book| book.id == id).cloned() else {
            return false;
        };
        self.buffer = FormBuffer::from_book(&book);
        self.current = Some(book);
        self.show(FormMode::Edit, trigger);
        true
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.buffer.set(field, value);
    }

    /// Track the viewport; an open form only updates its mobile flag.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(form) = self.form.as_mut() {
            form.placement = form.placement.resized(&viewport);
        }
    }

    /// Outside clicks close the form, except on controls that open it.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if self.form.is_some() && target == PointerTarget::Elsewhere {
            self.dismiss();
        }
    }

    /// Hide the form. The buffer is simply abandoned.
    pub fn dismiss(&mut self) {
        self.form = None;
    }

    /// Create or update from the buffer; on success reload and close.
    ///
    /// Nothing prevents a second submit while one is in flight.
    pub async fn submit(&mut self) {
        let buffer = self.buffer.clone();
        let (result, fallback) = match &self.current {
            Some(book) => {
                let request = UpdateBookRequest {
                    id: Some(IdInput::from(book.id)),
                    title: Some(buffer.title),
                    author: Some(buffer.author),
                    genre: Some(buffer.genre),
                };
                (self.api.update(&request).await, UPDATE_FAILED)
            }
            None => {
                let request = CreateBookRequest {
                    title: Some(buffer.title),
                    author: Some(buffer.author),
                    genre: Some(buffer.genre),
                };
                (self.api.create(&request).await, ADD_FAILED)
            }
        };

        match result {
            Ok(envelope) if envelope.success => {
                self.load().await;
                self.dismiss();
            }
            Ok(envelope) => self.fail(envelope.error_or(fallback)),
            Err(err) => self.fail(err.to_string()),
        }
    }

    /// Delete after confirmation; the row is dropped locally without a reload.
    pub async fn delete(&mut self, id: BookId, confirm: &mut impl Confirm) {
        if !confirm.confirm(DELETE_PROMPT) {
            return;
        }

        match self.api.delete(&DeleteBookRequest::new(id)).await {
            Ok(envelope) if envelope.success => self.books.retain(|book| book.id != id),
            Ok(envelope) => self.fail(envelope.error_or(DELETE_FAILED)),
            Err(err) => self.fail(err.to_string()),
        }
    }

    pub fn render(&self) -> View {
        if self.loading {
            return View::Loading;
        }
        if let Some(error) = &self.error {
            return View::Error(error.clone());
        }

        let form = self.form.map(|form| {
            let (heading, submit_label) = match form.mode {
                FormMode::Add => ("Add New Book", "Add"),
                FormMode::Edit => ("Edit Book", "Update"),
            };
            FormView {
                heading,
                submit_label,
                mode: form.mode,
                buffer: self.buffer.clone(),
                placement: form.placement,
                layout: form.placement.layout(&self.viewport),
            }
        });

        View::Catalog(CatalogView {
            rows: self.books.clone(),
            form,
        })
    }

    fn show(&mut self, mode: FormMode, trigger: Rect) {
        let placement = placement::place(&trigger, &self.viewport);
        self.form = Some(OpenForm { mode, placement });
    }

    fn fail(&mut self, message: String) {
        tracing::warn!(error = %message, "catalog entered error state");
        self.error = Some(message);
    }
}
