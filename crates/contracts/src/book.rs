use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a book.
pub type BookId = i64;

/// A persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier assigned by the store
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Genre of the book
    pub genre: String,
}

/// A validated book that has not been persisted yet.
///
/// Only obtainable through [`crate::CreateBookRequest::validate`], so all
/// three fields are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) genre: String,
}

impl NewBook {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }
}

/// Partial update of a book. `None` leaves the stored value untouched.
///
/// Empty strings never make it into a patch: an update that sends
/// `"title": ""` means "leave the title alone", not "clear it".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

impl BookPatch {
    /// Builds a patch, dropping absent and empty fields.
    pub fn from_fields(
        title: Option<String>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Self {
        Self {
            title: non_empty(title),
            author: non_empty(author),
            genre: non_empty(genre),
        }
    }

    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.genre.is_none()
    }

    /// Returns `book` with the patched fields overwritten.
    pub fn apply(&self, book: &Book) -> Book {
        Book {
            id: book.id,
            title: self.title.clone().unwrap_or_else(|| book.title.clone()),
            author: self.author.clone().unwrap_or_else(|| book.author.clone()),
            genre: self.genre.clone().unwrap_or_else(|| book.genre.clone()),
        }
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: "scifi".to_string(),
        }
    }

    #[test]
    fn patch_drops_empty_fields() {
        let patch = BookPatch::from_fields(Some(String::new()), None, Some("classic".into()));
        assert_eq!(patch.title, None);
        assert_eq!(patch.author, None);
        assert_eq!(patch.genre.as_deref(), Some("classic"));
    }

    #[test]
    fn patch_apply_only_touches_present_fields() {
        let patch = BookPatch::from_fields(Some("Dune Messiah".into()), None, None);
        let updated = patch.apply(&dune());
        assert_eq!(updated.id, 7);
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.author, "Herbert");
        assert_eq!(updated.genre, "scifi");
    }

    #[test]
    fn all_empty_patch_is_a_no_op() {
        let patch = BookPatch::from_fields(Some(String::new()), Some(String::new()), None);
        assert!(patch.is_empty());
        assert_eq!(patch.apply(&dune()), dune());
    }
}
