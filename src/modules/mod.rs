pub mod books;

use std::sync::Arc;

use shelf_db::DbPool;
use shelf_kernel::ModuleRegistry;

use books::store::SqlBookStore;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, pool: &DbPool) {
    registry.register(books::create_module(Arc::new(SqlBookStore::new(pool.clone()))));
}
