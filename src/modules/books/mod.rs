pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use shelf_kernel::{InitCtx, Migration, Module};

use store::BookStore;

/// Book catalog module: CRUD over the `book` table at `/api/books`
pub struct BooksModule {
    store: Arc<dyn BookStore>,
}

impl BooksModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }
}

/// Schema of the `book` table
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(
        "001_init",
        r#"
            CREATE TABLE IF NOT EXISTS book (
                id     INTEGER PRIMARY KEY AUTOINCREMENT,
                title  TEXT NOT NULL CHECK (title <> ''),
                author TEXT NOT NULL CHECK (author <> ''),
                genre  TEXT NOT NULL CHECK (genre <> '')
            );
            "#,
    )]
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.list().await?;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.environment(),
            books = books.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            serde_json::json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorEnvelope" }
                    }
                }
            })
        };
        let body = |schema: &str| {
            serde_json::json!({
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": format!("#/components/schemas/{}", schema) }
                    }
                }
            })
        };
        let ok = |description: &str, schema: &str| {
            serde_json::json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": format!("#/components/schemas/{}", schema) }
                    }
                }
            })
        };

        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": ok("All books", "BookListEnvelope"),
                            "500": error("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": body("CreateBook"),
                        "responses": {
                            "201": ok("Created book", "BookEnvelope"),
                            "400": error("Title, author or genre missing"),
                            "500": error("Internal server error")
                        }
                    },
                    "put": {
                        "summary": "Update the non-empty fields of a book",
                        "tags": ["Books"],
                        "requestBody": body("UpdateBook"),
                        "responses": {
                            "200": ok("Book updated", "BookEnvelope"),
                            "400": error("Book ID missing"),
                            "404": error("Book not found"),
                            "500": error("Internal server error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "requestBody": body("DeleteBook"),
                        "responses": {
                            "200": ok("Book deleted", "BookEnvelope"),
                            "400": error("Book ID missing"),
                            "404": error("Book not found"),
                            "500": error("Internal server error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "description": "Store-assigned identifier" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" }
                        },
                        "required": ["id", "title", "author", "genre"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" }
                        },
                        "required": ["title", "author", "genre"]
                    },
                    "UpdateBook": {
                        "type": "object",
                        "description": "Empty strings leave the stored value unchanged",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" }
                        },
                        "required": ["id"]
                    },
                    "DeleteBook": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" }
                        },
                        "required": ["id"]
                    },
                    "BookEnvelope": {
                        "type": "object",
                        "properties": {
                            "success": { "type": "boolean" },
                            "message": { "type": "string" },
                            "data": { "$ref": "#/components/schemas/Book" }
                        },
                        "required": ["success"]
                    },
                    "BookListEnvelope": {
                        "type": "object",
                        "properties": {
                            "success": { "type": "boolean" },
                            "data": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["success"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
