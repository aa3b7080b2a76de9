use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::product::{Product, Variant};

/// Seam between the domain and whatever storage layer backs it. The store
/// crate ships an in-memory implementation; a database-backed one plugs in
/// here without touching the handlers.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All products in insertion order.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Lookup by slug. The slug is normalized before matching.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError>;

    /// Lookup of one variation within a product. `None` when either the
    /// product or the variation is absent.
    async fn get_variation(
        &self,
        slug: &str,
        variation_id: Uuid,
    ) -> Result<Option<(Product, Variant)>, CatalogError>;
}
