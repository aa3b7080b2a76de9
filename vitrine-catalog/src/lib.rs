pub mod error;
pub mod product;
pub mod repository;
pub mod selector;

pub use error::{CatalogError, CatalogResult};
pub use product::{ImageRef, NewProduct, NewVariant, Product, Variant};
pub use repository::CatalogRepository;
pub use selector::{Selection, SelectionState, SelectionView, VariantSelector};
