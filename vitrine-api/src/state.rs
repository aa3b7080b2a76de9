use std::collections::HashSet;
use std::sync::Arc;

use vitrine_catalog::CatalogRepository;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    /// Exact-match origin allowlist for cross-origin requests.
    pub allowed_origins: Arc<HashSet<String>>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogRepository>, allowed_origins: Vec<String>) -> Self {
        Self {
            catalog,
            allowed_origins: Arc::new(allowed_origins.into_iter().collect()),
        }
    }
}
