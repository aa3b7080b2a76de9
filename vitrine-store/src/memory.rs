use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use vitrine_catalog::product::normalize;
use vitrine_catalog::{CatalogError, CatalogRepository, Product, Variant};

/// In-memory catalog repository keyed by normalized slug.
///
/// Products are held in insertion order with a slug index on the side.
/// Reads clone, so every request works on its own snapshot.
pub struct MemoryCatalog {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    by_slug: HashMap<String, usize>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Build a catalog from a validated seed. Duplicate slugs are rejected.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut inner = Inner::default();
        for product in products {
            Self::insert_into(&mut inner, product)?;
        }
        Ok(Self {
            inner: RwLock::new(inner),
        })
    }

    pub async fn insert(&self, product: Product) -> Result<(), CatalogError> {
        let mut inner = self.inner.write().await;
        Self::insert_into(&mut inner, product)
    }

    fn insert_into(inner: &mut Inner, product: Product) -> Result<(), CatalogError> {
        if inner.by_slug.contains_key(&product.slug) {
            return Err(CatalogError::Validation(format!(
                "duplicate product slug '{}'",
                product.slug
            )));
        }
        inner.by_slug.insert(product.slug.clone(), inner.products.len());
        inner.products.push(product);
        Ok(())
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        let slug = normalize(slug);
        let inner = self.inner.read().await;
        Ok(inner
            .by_slug
            .get(&slug)
            .map(|&idx| inner.products[idx].clone()))
    }

    async fn get_variation(
        &self,
        slug: &str,
        variation_id: Uuid,
    ) -> Result<Option<(Product, Variant)>, CatalogError> {
        let Some(product) = self.get_by_slug(slug).await? else {
            return Ok(None);
        };
        let variant = product
            .variants
            .iter()
            .find(|v| v.id == variation_id)
            .cloned();
        Ok(variant.map(|v| (product, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::load_seed;

    async fn store() -> MemoryCatalog {
        MemoryCatalog::from_products(load_seed(None).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = store().await;
        let products = store.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].slug, "heavyweight-tee");
        assert_eq!(products[1].slug, "canvas-tote");
    }

    #[tokio::test]
    async fn slug_lookup_normalizes() {
        let store = store().await;
        let product = store.get_by_slug("  Heavyweight-Tee ").await.unwrap();
        assert!(product.is_some());
        assert!(store.get_by_slug("no-such-thing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn variation_lookup_hits_and_misses() {
        let store = store().await;
        let product = store.get_by_slug("canvas-tote").await.unwrap().unwrap();
        let id = product.variants[0].id;

        let (found_product, found_variant) =
            store.get_variation("canvas-tote", id).await.unwrap().unwrap();
        assert_eq!(found_product.slug, "canvas-tote");
        assert_eq!(found_variant.id, id);

        // Right id, wrong product.
        assert!(store
            .get_variation("heavyweight-tee", id)
            .await
            .unwrap()
            .is_none());
        // Unknown id.
        assert!(store
            .get_variation("canvas-tote", Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let store = store().await;
        let dup = store.get_by_slug("canvas-tote").await.unwrap().unwrap();
        let err = store.insert(dup).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
