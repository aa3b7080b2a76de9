use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::product::{normalize, ImageRef, Variant};

/// The shopper's in-progress choice of color and size.
///
/// Created empty; changed only through [`VariantSelector::select_color`] and
/// [`VariantSelector::select_size`]. A color change always resets the size,
/// because size availability is scoped to the chosen color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub color: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionState {
    Empty,
    ColorChosen,
    FullyChosen,
}

impl Selection {
    pub fn state(&self) -> SelectionState {
        match (&self.color, &self.size) {
            (None, _) => SelectionState::Empty,
            (Some(_), None) => SelectionState::ColorChosen,
            (Some(_), Some(_)) => SelectionState::FullyChosen,
        }
    }
}

/// One selectable color, with its stock-derived availability flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorOption {
    pub color: String,
    pub available: bool,
}

/// One selectable size for the currently chosen color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeOption {
    pub size: String,
    pub available: bool,
}

/// Everything a product page derives from `(variants, selection)`: the
/// color swatches, the size row, the image strip and the resolved variant.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionView {
    pub selection: Selection,
    pub state: SelectionState,
    pub colors: Vec<ColorOption>,
    pub sizes: Vec<SizeOption>,
    pub images: Vec<ImageRef>,
    pub variant: Option<Variant>,
}

/// Pure decision engine over a product's variant list.
///
/// Borrows the variants and holds no other state; every method is a
/// synchronous function of its inputs and is safe to call from any number
/// of concurrent requests.
#[derive(Debug, Clone, Copy)]
pub struct VariantSelector<'a> {
    variants: &'a [Variant],
}

impl<'a> VariantSelector<'a> {
    pub fn new(variants: &'a [Variant]) -> Self {
        Self { variants }
    }

    /// Distinct colors in order of first appearance.
    pub fn unique_colors(&self) -> Vec<&'a str> {
        let mut colors: Vec<&str> = Vec::new();
        for variant in self.variants {
            if !colors.contains(&variant.color.as_str()) {
                colors.push(&variant.color);
            }
        }
        colors
    }

    /// Sizes carried by variants of the given color, in appearance order.
    ///
    /// Duplicates are preserved exactly as they occur in the source data;
    /// unset color yields an empty list, as do variants without sizing.
    pub fn sizes_for_color(&self, color: Option<&str>) -> Vec<&'a str> {
        let Some(color) = color.map(normalize) else {
            return Vec::new();
        };
        self.variants
            .iter()
            .filter(|v| v.color == color)
            .filter_map(|v| v.size.as_deref())
            .collect()
    }

    /// True iff at least one variant of this color has stock.
    pub fn is_color_available(&self, color: &str) -> bool {
        let color = normalize(color);
        self.variants
            .iter()
            .any(|v| v.color == color && v.stock > 0)
    }

    /// True iff at least one variant with this exact (color, size) pair has
    /// stock. `size` of `None` matches unsized variants.
    pub fn is_size_available(&self, color: &str, size: Option<&str>) -> bool {
        let color = normalize(color);
        let size = size.map(normalize);
        self.variants
            .iter()
            .any(|v| v.color == color && v.size == size && v.stock > 0)
    }

    /// First variant matching both keys; `None` when either key is unset
    /// (for sized products) or nothing matches. Multiple matches are a
    /// data-quality anomaly resolved by sequence order, not an error.
    pub fn resolve_variant(
        &self,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Option<&'a Variant> {
        let color = normalize(color?);
        let size = size.map(normalize);
        self.variants
            .iter()
            .find(|v| v.color == color && v.size == size)
    }

    /// Image set of the first variant of this color - one representative
    /// variant per color family, not a union across the group.
    pub fn images_for_color(&self, color: &str) -> &'a [ImageRef] {
        let color = normalize(color);
        self.variants
            .iter()
            .find(|v| v.color == color)
            .map(|v| v.images.as_slice())
            .unwrap_or(&[])
    }

    /// Choose a color. Always resets any previously chosen size; rejects
    /// colors that are unknown or fully out of stock.
    pub fn select_color(
        &self,
        _current: &Selection,
        color: &str,
    ) -> Result<Selection, CatalogError> {
        let color = normalize(color);
        if color.is_empty() || !self.is_color_available(&color) {
            return Err(CatalogError::InvalidSelection(format!(
                "color '{color}' is not available"
            )));
        }
        Ok(Selection {
            color: Some(color),
            size: None,
        })
    }

    /// Choose a size for the already-chosen color; rejects when no color is
    /// chosen or the (color, size) pair is out of stock.
    pub fn select_size(
        &self,
        current: &Selection,
        size: &str,
    ) -> Result<Selection, CatalogError> {
        let Some(color) = current.color.as_deref() else {
            return Err(CatalogError::InvalidSelection(
                "choose a color before a size".into(),
            ));
        };
        let size = normalize(size);
        if size.is_empty() || !self.is_size_available(color, Some(&size)) {
            return Err(CatalogError::InvalidSelection(format!(
                "size '{size}' is not available in color '{color}'"
            )));
        }
        Ok(Selection {
            color: current.color.clone(),
            size: Some(size),
        })
    }

    /// Derive the full product-page view for a selection.
    pub fn view(&self, selection: &Selection) -> SelectionView {
        let colors = self
            .unique_colors()
            .into_iter()
            .map(|color| ColorOption {
                available: self.is_color_available(color),
                color: color.to_owned(),
            })
            .collect();

        let sizes = self
            .sizes_for_color(selection.color.as_deref())
            .into_iter()
            .map(|size| SizeOption {
                available: self
                    .is_size_available(selection.color.as_deref().unwrap_or(""), Some(size)),
                size: size.to_owned(),
            })
            .collect();

        let images = selection
            .color
            .as_deref()
            .map(|c| self.images_for_color(c).to_vec())
            .unwrap_or_default();

        let variant = self
            .resolve_variant(selection.color.as_deref(), selection.size.as_deref())
            .cloned();

        SelectionView {
            selection: selection.clone(),
            state: selection.state(),
            colors,
            sizes,
            images,
            variant,
        }
    }
}
