use vitrine_catalog::{CatalogError, NewProduct, Product};

/// Demo catalog used when no seed file is configured.
const DEMO_SEED: &str = r##"
[
  {
    "name": "Heavyweight Tee",
    "slug": "heavyweight-tee",
    "summary": "Boxy-fit heavyweight cotton tee",
    "description": "240gsm combed cotton, pre-shrunk, ribbed collar.",
    "brand": "Vitrine",
    "category": "shirts",
    "variants": [
      {
        "code": "hw-red-s",
        "name": "heavyweight tee red s",
        "color": "red",
        "hex": "#c0392b",
        "size": "s",
        "price_cents": 2900,
        "stock": 0,
        "images": [
          { "public_id": "vitrine/hw-red-front", "url": "https://img.vitrine.dev/hw-red-front.jpg" },
          { "public_id": "vitrine/hw-red-back", "url": "https://img.vitrine.dev/hw-red-back.jpg" }
        ]
      },
      {
        "code": "hw-red-m",
        "name": "heavyweight tee red m",
        "color": "red",
        "hex": "#c0392b",
        "size": "m",
        "price_cents": 2900,
        "stock": 12,
        "images": []
      },
      {
        "code": "hw-blue-m",
        "name": "heavyweight tee blue m",
        "color": "blue",
        "hex": "#2980b9",
        "size": "m",
        "price_cents": 2900,
        "stock": 5,
        "images": [
          { "public_id": "vitrine/hw-blue-front", "url": "https://img.vitrine.dev/hw-blue-front.jpg" }
        ]
      }
    ]
  },
  {
    "name": "Canvas Tote",
    "slug": "canvas-tote",
    "summary": "One-size natural canvas tote",
    "description": "14oz canvas, flat bottom, interior pocket.",
    "brand": "Vitrine",
    "category": "bags",
    "variants": [
      {
        "code": "tote-nat",
        "name": "canvas tote natural",
        "color": "natural",
        "hex": "#ede0c8",
        "price_cents": 1800,
        "stock": 40,
        "images": [
          { "public_id": "vitrine/tote-nat", "url": "https://img.vitrine.dev/tote-nat.jpg" }
        ]
      }
    ]
  }
]
"##;

/// Load and validate a catalog seed. `path` points at a JSON array of
/// products; unset falls back to the built-in demo catalog.
pub fn load_seed(path: Option<&str>) -> Result<Vec<Product>, CatalogError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Store(format!("cannot read seed file {path}: {e}")))?,
        None => DEMO_SEED.to_owned(),
    };

    let drafts: Vec<NewProduct> = serde_json::from_str(&raw)
        .map_err(|e| CatalogError::Validation(format!("malformed seed document: {e}")))?;

    let products = drafts
        .into_iter()
        .map(Product::new)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(count = products.len(), "catalog seed loaded");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_parses_and_validates() {
        let products = load_seed(None).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].slug, "heavyweight-tee");
        // The tote has no sizing.
        assert_eq!(products[1].variants[0].size, None);
    }

    #[test]
    fn missing_seed_file_is_a_store_error() {
        let err = load_seed(Some("/does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Store(_)));
    }

    #[test]
    fn malformed_seed_is_a_validation_error() {
        let dir = std::env::temp_dir().join("vitrine-seed-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_seed(path.to_str()).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
