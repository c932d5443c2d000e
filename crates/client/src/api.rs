use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shelf_contracts::{
    Book, CreateBookRequest, DeleteBookRequest, Envelope, UpdateBookRequest, BOOKS_PATH,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The four operations of `/api/books`.
///
/// Implementations return the server's envelope as-is, including failure
/// envelopes; only transport and decoding problems become [`ClientError`].
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list(&self) -> Result<Envelope<Vec<Book>>, ClientError>;

    async fn create(&self, request: &CreateBookRequest) -> Result<Envelope<Book>, ClientError>;

    async fn update(&self, request: &UpdateBookRequest) -> Result<Envelope<Book>, ClientError>;

    async fn delete(&self, request: &DeleteBookRequest) -> Result<Envelope<Book>, ClientError>;
}

/// [`BooksApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    client: Client,
    url: String,
}

impl HttpBooksApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), BOOKS_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client.request(method, &self.url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let response = request.send().await?;
        tracing::debug!(status = %response.status(), url = %self.url, "books api responded");
        Ok(response.json::<Envelope<T>>().await?)
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list(&self) -> Result<Envelope<Vec<Book>>, ClientError> {
        self.send(self.request(Method::GET)).await
    }

    async fn create(&self, request: &CreateBookRequest) -> Result<Envelope<Book>, ClientError> {
        self.send(self.request(Method::POST).json(request)).await
    }

    async fn update(&self, request: &UpdateBookRequest) -> Result<Envelope<Book>, ClientError> {
        self.send(self.request(Method::PUT).json(request)).await
    }

    async fn delete(&self, request: &DeleteBookRequest) -> Result<Envelope<Book>, ClientError> {
        self.send(self.request(Method::DELETE).json(request)).await
    }
}
