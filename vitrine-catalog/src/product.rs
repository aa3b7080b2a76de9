use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;

/// Reference to a hosted product image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub public_id: String,
    pub url: String,
}

/// One purchasable configuration of a product.
///
/// String fields are normalized (trimmed + lowercased) at construction;
/// a variant is available iff `stock > 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub color: String,
    pub hex: String,
    pub size: Option<String>,
    pub price_cents: i64,
    pub stock: u32,
    pub images: Vec<ImageRef>,
}

/// Unvalidated variant input, as received from a seed document or an
/// ingestion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVariant {
    pub code: String,
    pub name: String,
    pub color: String,
    pub hex: String,
    #[serde(default)]
    pub size: Option<String>,
    pub price_cents: i64,
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// A sellable product with its ordered variant list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub summary: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub variants: Vec<Variant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated product input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub summary: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub variants: Vec<NewVariant>,
}

const MAX_CODE_LEN: usize = 10;
const MAX_NAME_LEN: usize = 100;
const MAX_SUMMARY_LEN: usize = 350;
const MAX_PRICE_CENTS: i64 = 1_000_000;
const MAX_STOCK: u32 = 1_000;

/// Explicit normalization applied at the construction boundary: trim and
/// lowercase, so that all later comparisons are plain equality.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn required(field: &str, value: &str) -> Result<String, CatalogError> {
    let value = normalize(value);
    if value.is_empty() {
        return Err(CatalogError::Validation(format!(
            "must provide a {field}"
        )));
    }
    Ok(value)
}

fn bounded(field: &str, value: String, max: usize) -> Result<String, CatalogError> {
    if value.chars().count() > max {
        return Err(CatalogError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value)
}

fn valid_hex(value: &str) -> Result<String, CatalogError> {
    let value = normalize(value);
    let digits = value.strip_prefix('#').unwrap_or("");
    let well_formed = matches!(digits.len(), 3 | 6)
        && digits.chars().all(|c| c.is_ascii_hexdigit());
    if !well_formed {
        return Err(CatalogError::Validation(format!(
            "hex color '{value}' is not a #rgb or #rrggbb value"
        )));
    }
    Ok(value)
}

impl Variant {
    pub fn new(input: NewVariant) -> Result<Self, CatalogError> {
        let code = bounded("variant code", required("variant code", &input.code)?, MAX_CODE_LEN)?;
        let name = bounded("variant name", required("variant name", &input.name)?, MAX_NAME_LEN)?;
        let color = required("variant color", &input.color)?;
        let hex = valid_hex(&input.hex)?;

        let size = match input.size.as_deref() {
            None => None,
            Some(s) if normalize(s).is_empty() => None,
            Some(s) => Some(normalize(s)),
        };

        if input.price_cents < 0 {
            return Err(CatalogError::Validation(
                "price must be greater than or equal to 0".into(),
            ));
        }
        if input.price_cents > MAX_PRICE_CENTS {
            return Err(CatalogError::Validation(format!(
                "price must be at most {MAX_PRICE_CENTS} cents"
            )));
        }
        if input.stock > MAX_STOCK {
            return Err(CatalogError::Validation(format!(
                "stock must be at most {MAX_STOCK}"
            )));
        }
        for image in &input.images {
            if image.public_id.trim().is_empty() || image.url.trim().is_empty() {
                return Err(CatalogError::Validation(
                    "image requires a public_id and a url".into(),
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            code,
            name,
            color,
            hex,
            size,
            price_cents: input.price_cents,
            stock: input.stock,
            images: input.images,
        })
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

impl Product {
    pub fn new(input: NewProduct) -> Result<Self, CatalogError> {
        let name = bounded("product name", required("product name", &input.name)?, MAX_NAME_LEN)?;
        let slug = required("product slug", &input.slug)?;
        let summary = bounded(
            "product summary",
            required("product summary", &input.summary)?,
            MAX_SUMMARY_LEN,
        )?;
        let description = required("product description", &input.description)?;
        let brand = required("product brand", &input.brand)?;
        let category = required("product category", &input.category)?;

        if input.variants.is_empty() {
            return Err(CatalogError::Validation(
                "product requires at least one variant".into(),
            ));
        }
        let variants = input
            .variants
            .into_iter()
            .map(Variant::new)
            .collect::<Result<Vec<_>, _>>()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            slug,
            summary,
            description,
            brand,
            category,
            variants,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewVariant {
        NewVariant {
            code: "TS-RED-M".into(),
            name: "Tee / Red / M".into(),
            color: "Red".into(),
            hex: "#FF0000".into(),
            size: Some("M".into()),
            price_cents: 1999,
            stock: 5,
            images: vec![],
        }
    }

    #[test]
    fn variant_construction_normalizes_strings() {
        let variant = Variant::new(NewVariant {
            color: "  Red ".into(),
            size: Some(" M ".into()),
            ..draft()
        })
        .unwrap();

        assert_eq!(variant.color, "red");
        assert_eq!(variant.size.as_deref(), Some("m"));
        assert_eq!(variant.hex, "#ff0000");
        assert!(variant.is_available());
    }

    #[test]
    fn variant_rejects_bad_hex() {
        let err = Variant::new(NewVariant {
            hex: "ff0000".into(),
            ..draft()
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = Variant::new(NewVariant {
            hex: "#ff00".into(),
            ..draft()
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn variant_rejects_negative_price_and_overlong_code() {
        assert!(Variant::new(NewVariant { price_cents: -1, ..draft() }).is_err());
        assert!(Variant::new(NewVariant {
            code: "WAY-TOO-LONG-CODE".into(),
            ..draft()
        })
        .is_err());
    }

    #[test]
    fn blank_size_becomes_unset() {
        let variant = Variant::new(NewVariant {
            size: Some("   ".into()),
            ..draft()
        })
        .unwrap();
        assert_eq!(variant.size, None);
    }

    #[test]
    fn product_requires_a_variant() {
        let err = Product::new(NewProduct {
            name: "Basic Tee".into(),
            slug: "basic-tee".into(),
            summary: "A tee".into(),
            description: "Plain cotton tee".into(),
            brand: "Vitrine".into(),
            category: "shirts".into(),
            variants: vec![],
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn product_slug_is_normalized() {
        let product = Product::new(NewProduct {
            name: "Basic Tee".into(),
            slug: "  Basic-Tee ".into(),
            summary: "A tee".into(),
            description: "Plain cotton tee".into(),
            brand: "Vitrine".into(),
            category: "Shirts".into(),
            variants: vec![draft()],
        })
        .unwrap();
        assert_eq!(product.slug, "basic-tee");
        assert_eq!(product.category, "shirts");
    }
}
