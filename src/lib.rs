//! Shelf application library
//!
//! Wires the book catalog module into the kernel registry, the SQLite pool,
//! and the HTTP server.

pub mod modules;

use std::future::Future;

use anyhow::Context;
use axum::Router;
use shelf_db::DbPool;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// A fully prepared application: connected, migrated, modules initialized.
pub struct App {
    pub settings: Settings,
    pub pool: DbPool,
    pub registry: ModuleRegistry,
}

impl App {
    /// Connect to the database and register modules.
    pub async fn connect(settings: Settings) -> anyhow::Result<Self> {
        let pool = shelf_db::create_pool(&settings.database)
            .await
            .context("failed to open database")?;

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &pool);

        Ok(Self {
            settings,
            pool,
            registry,
        })
    }

    /// Connect, run pending migrations and initialize every module.
    pub async fn prepare(settings: Settings) -> anyhow::Result<Self> {
        let app = Self::connect(settings).await?;
        app.migrate().await?;

        let ctx = InitCtx::new(&app.settings);
        app.registry.init_modules(&ctx).await?;

        Ok(app)
    }

    /// Apply pending module migrations; returns how many ran.
    pub async fn migrate(&self) -> anyhow::Result<usize> {
        let migrations = self.registry.collect_migrations();
        let applied = shelf_db::run_migrations(&self.pool, &migrations)
            .await
            .context("failed to run migrations")?;
        tracing::info!(applied, total = migrations.len(), "migrations complete");
        Ok(applied)
    }

    /// The HTTP router with every module mounted.
    pub fn router(&self) -> Router {
        shelf_http::build_router(&self.registry, &self.settings)
    }

    /// Start modules, serve HTTP until `shutdown` resolves, then stop modules.
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        let ctx = InitCtx::new(&self.settings);
        self.registry.start_modules(&ctx).await?;

        let served = shelf_http::start_server(&self.registry, &self.settings, shutdown).await;

        self.registry.stop_modules().await?;
        self.pool.close().await;
        served
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
