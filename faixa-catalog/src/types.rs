//! Data model types for the price list and the product catalog.
//!
//! These types cover one import run end to end: raw spreadsheet rows, the
//! brand-scoped blocks they are grouped into, consolidated price records,
//! indexed asset folders, and the projected catalog products.

use serde::{Deserialize, Serialize};

// ── Spreadsheet ─────────────────────────────────────────────────────────────

/// One spreadsheet line in the fixed column order
/// model, color, part, element, price, location, reference.
///
/// Text cells are already trimmed. `price` is `None` when the cell is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub model: String,
    pub color: String,
    pub part: String,
    pub element: String,
    pub price: Option<f64>,
    pub location: String,
    pub reference: String,
}

impl RawRow {
    /// True when the price cell is empty or holds zero.
    pub fn price_is_zero(&self) -> bool {
        self.price.is_none_or(|p| p == 0.0)
    }

    /// Price as written, defaulting to `0.0`.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

/// A contiguous run of data rows within one brand context.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub brand: String,
    pub rows: Vec<RawRow>,
}

// ── Price list ──────────────────────────────────────────────────────────────

/// A single purchasable part of a price record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub part: String,
    pub element: String,
    /// Never negative; missing prices are stored as `0.0`.
    pub price: f64,
    pub location: String,
    pub reference: String,
}

/// Composite natural key of a price record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NaturalKey {
    pub brand: String,
    pub model: String,
    pub color: String,
}

impl NaturalKey {
    pub fn new(brand: impl Into<String>, model: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            color: color.into(),
        }
    }
}

/// A consolidated price-list entry: one model/color of one brand with its parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub brand: String,
    /// Year-normalized model, e.g. "HAYABUSA 2008".
    pub model: String,
    /// Pre-normalization spelling, e.g. "HAYABUSA 08". Only used to find rows
    /// persisted before the year format changed.
    pub legacy_model: Option<String>,
    pub color: String,
    pub year: Option<i32>,
    pub variants: Vec<Variant>,
}

impl PriceRecord {
    pub fn key(&self) -> NaturalKey {
        NaturalKey::new(&self.brand, &self.model, &self.color)
    }

    /// The key this record would have had under the legacy model spelling.
    pub fn legacy_key(&self) -> Option<NaturalKey> {
        self.legacy_model
            .as_ref()
            .map(|legacy| NaturalKey::new(&self.brand, legacy, &self.color))
    }
}

// ── Assets ──────────────────────────────────────────────────────────────────

/// A folder in the asset tree that directly contains images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFolder {
    /// Path relative to the asset root, `/`-separated, starting with the brand folder.
    pub path: String,
    /// Normalized path segments below the brand folder, space-joined.
    pub normalized_key: String,
    /// Image filenames, sorted.
    pub images: Vec<String>,
}

/// An image picked for a product by the asset resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// Relative path of the folder holding the image.
    pub folder: String,
    pub filename: String,
    /// 1-based display order.
    pub position: u32,
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// An image attached to a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Content-addressed id derived from folder path and filename.
    pub id: String,
    pub src: String,
    pub filename: String,
    pub position: u32,
    pub alt: String,
}

/// A catalog variant, optionally bound to one of the product's images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub part: String,
    pub element: String,
    pub price: f64,
    pub location: String,
    pub reference: String,
    pub image_id: Option<String>,
}

/// Source attributes carried along with a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub brand: String,
    pub model: String,
    pub color: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// The external catalog record built from a price record and its images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// URL-safe unique key.
    pub handle: String,
    /// Handle under the legacy model spelling. Reconciliation only, never stored.
    #[serde(skip)]
    pub legacy_handle: Option<String>,
    pub name: String,
    pub description: String,
    pub variants: Vec<ProductVariant>,
    pub images: Vec<ProductImage>,
    pub metadata: ProductMetadata,
}

// ── Persistence ─────────────────────────────────────────────────────────────

/// Identity of a stored row that must survive re-imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIdentity {
    pub id: i64,
    pub created_at: String,
}

/// Log entry for one import run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub source_name: String,
    pub imported_at: String,
    pub records_inserted: i64,
    pub records_replaced: i64,
    pub records_failed: i64,
    pub products_inserted: i64,
    pub products_replaced: i64,
    pub products_failed: i64,
}
