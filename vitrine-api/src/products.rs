use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_catalog::{Product, Selection, SelectionView, Variant, VariantSelector};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub brand: String,
    pub category: String,
    pub summary: String,
    pub variant_count: usize,
    pub from_price_cents: Option<i64>,
    pub in_stock: bool,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct VariationResponse {
    pub variation: Variant,
}

#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    pub color: Option<String>,
    pub size: Option<String>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            summary: product.summary.clone(),
            variant_count: product.variants.len(),
            from_price_cents: product.variants.iter().map(|v| v.price_cents).min(),
            in_stock: product.variants.iter().any(|v| v.stock > 0),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/{slug}", get(get_product_by_slug))
        .route(
            "/api/v1/products/{slug}/variations/{variation_id}",
            get(get_variation),
        )
        .route("/api/v1/products/{slug}/options", get(get_options))
}

/// GET /api/v1/products
async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = state.catalog.list_products().await?;
    let products = products.iter().map(ProductSummary::from).collect();
    Ok(Json(ProductsResponse { products }))
}

/// GET /api/v1/products/{slug}
async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .catalog
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(Json(ProductResponse { product }))
}

/// GET /api/v1/products/{slug}/variations/{variation_id}
async fn get_variation(
    State(state): State<AppState>,
    Path((slug, variation_id)): Path<(String, Uuid)>,
) -> Result<Json<VariationResponse>, AppError> {
    // Distinguish the two misses so the body names what is absent.
    let product = state
        .catalog
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    let variation = product
        .variants
        .iter()
        .find(|v| v.id == variation_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Variation not found".into()))?;

    Ok(Json(VariationResponse { variation }))
}

/// GET /api/v1/products/{slug}/options?color=&size=
///
/// Derives the full selection view for the product page: color swatches
/// with availability, sizes scoped to the chosen color, the representative
/// image set and the resolved variant. Out-of-stock or unknown choices are
/// rejected with 422 rather than silently ignored.
async fn get_options(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<OptionsQuery>,
) -> Result<Json<SelectionView>, AppError> {
    let product = state
        .catalog
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    let selector = VariantSelector::new(&product.variants);
    let mut selection = Selection::default();
    if let Some(color) = query.color.as_deref() {
        selection = selector.select_color(&selection, color)?;
    }
    if let Some(size) = query.size.as_deref() {
        selection = selector.select_size(&selection, size)?;
    }

    Ok(Json(selector.view(&selection)))
}
