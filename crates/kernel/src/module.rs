use async_trait::async_trait;
use axum::Router;

use crate::settings::{Environment, Settings};

/// What a module sees while the application boots or starts serving.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

impl<'a> InitCtx<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn environment(&self) -> &Environment {
        &self.settings.environment
    }
}

/// One schema step owned by a module.
///
/// `id` is recorded in the migration ledger once `up` has run, so it must
/// never be reused for different SQL.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

impl Migration {
    pub const fn new(id: &'static str, up: &'static str) -> Self {
        Self { id, up }
    }
}

/// A feature area of the service, plugged into the [`crate::ModuleRegistry`].
///
/// Only `name` is required. Lifecycle order is: migrations, `init`, `start`,
/// serve, `stop`.
#[async_trait]
pub trait Module: Sync + Send {
    /// Path segment under `/api` and key in the migration ledger.
    fn name(&self) -> &'static str;

    /// Runs after migrations; a failure aborts startup.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Router mounted at `/api/{name}`.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment with `paths` relative to the module root and optional
    /// `components.schemas`.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    fn migrations(&self) -> Vec<Migration> {
        Vec::new()
    }

    /// Called right before the server starts accepting connections.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called after the server has drained, in reverse registration order.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
