//! Request extractors that reject with an envelope instead of plain text.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor for envelope-speaking endpoints.
///
/// Unlike [`axum::Json`] it does not insist on a `Content-Type` header, and an
/// empty body is read as `{}` so that missing fields surface as validation
/// errors rather than parse errors.
#[derive(Debug, Clone)]
pub struct EnvelopeJson<T>(pub T);

impl<S, T> FromRequest<S> for EnvelopeJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body)
            .map(EnvelopeJson)
            .map_err(|err| ApiError::bad_request(format!("Invalid request body: {}", err)))
    }
}
