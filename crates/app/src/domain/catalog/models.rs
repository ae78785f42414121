//! Catalog Models

/// Purchasable product variant with its own price and stock count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sku {
    pub id: i64,
    pub name: String,
    /// Price in minor units (cents).
    pub price: u64,
    pub default_image_url: String,
    pub stock: u64,
    pub sales: u64,
}
