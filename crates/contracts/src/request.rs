//! Request payloads accepted by `/api/books` and their validation.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::book::{non_empty, BookId, BookPatch, NewBook};

/// Reasons a request payload is rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title, author and genre are required fields")]
    MissingFields,
    #[error("Book ID is required for updates")]
    MissingUpdateId,
    #[error("Book ID is required")]
    MissingId,
    #[error("Book ID must be an integer")]
    InvalidId,
}

/// A book id as it may appear in a request body.
///
/// Any JSON value deserializes; whether it is a usable id is decided by
/// [`IdInput::resolve`], so a bad id is a validation error rather than a
/// malformed body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(BookId),
    Float(f64),
    Flag(bool),
    Text(String),
    /// Arrays, objects and integers outside the id range.
    Unsupported,
}

impl IdInput {
    /// Resolves the id. `0`, `false` and blank strings count as absent;
    /// fractional numbers are truncated.
    pub fn resolve(&self) -> Result<Option<BookId>, ValidationError> {
        let id = match self {
            IdInput::Number(id) => *id,
            IdInput::Float(value) if *value == 0.0 => return Ok(None),
            IdInput::Float(value) => {
                let whole = value.trunc();
                if !whole.is_finite() || whole == 0.0 || whole.abs() > i64::MAX as f64 {
                    return Err(ValidationError::InvalidId);
                }
                whole as BookId
            }
            IdInput::Flag(false) => return Ok(None),
            IdInput::Flag(true) | IdInput::Unsupported => return Err(ValidationError::InvalidId),
            IdInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse::<BookId>()
                    .map_err(|_| ValidationError::InvalidId)?
            }
        };
        Ok((id != 0).then_some(id))
    }
}

impl<'de> Deserialize<'de> for IdInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdInputVisitor)
    }
}

struct IdInputVisitor;

impl<'de> Visitor<'de> for IdInputVisitor {
    type Value = IdInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a book id")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<IdInput, E> {
        Ok(IdInput::Flag(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<IdInput, E> {
        Ok(IdInput::Number(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<IdInput, E> {
        Ok(BookId::try_from(value).map_or(IdInput::Unsupported, IdInput::Number))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<IdInput, E> {
        Ok(IdInput::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<IdInput, E> {
        Ok(IdInput::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<IdInput, E> {
        Ok(IdInput::Text(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<IdInput, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(IdInput::Unsupported)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<IdInput, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(IdInput::Unsupported)
    }
}

impl From<BookId> for IdInput {
    fn from(id: BookId) -> Self {
        IdInput::Number(id)
    }
}

fn resolve_id(
    id: Option<&IdInput>,
    missing: ValidationError,
) -> Result<BookId, ValidationError> {
    match id {
        Some(input) => input.resolve()?.ok_or(missing),
        None => Err(missing),
    }
}

/// Body of `POST /api/books`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl CreateBookRequest {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            genre: Some(genre.into()),
        }
    }

    /// Requires all three fields to be present and non-empty.
    pub fn validate(self) -> Result<NewBook, ValidationError> {
        match (
            non_empty(self.title),
            non_empty(self.author),
            non_empty(self.genre),
        ) {
            (Some(title), Some(author), Some(genre)) => Ok(NewBook {
                title,
                author,
                genre,
            }),
            _ => Err(ValidationError::MissingFields),
        }
    }
}

/// Body of `PUT /api/books`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl UpdateBookRequest {
    /// Splits the request into the target id and the patch to apply.
    pub fn validate(self) -> Result<(BookId, BookPatch), ValidationError> {
        let id = resolve_id(self.id.as_ref(), ValidationError::MissingUpdateId)?;
        Ok((id, BookPatch::from_fields(self.title, self.author, self.genre)))
    }
}

/// Body of `DELETE /api/books`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteBookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdInput>,
}

impl DeleteBookRequest {
    pub fn new(id: BookId) -> Self {
        Self {
            id: Some(IdInput::Number(id)),
        }
    }

    pub fn validate(self) -> Result<BookId, ValidationError> {
        resolve_id(self.id.as_ref(), ValidationError::MissingId)
    }
}
