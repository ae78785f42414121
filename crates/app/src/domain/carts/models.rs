//! Cart Models

/// One pending purchase selection, keyed by sku within an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEntry {
    pub sku_id: i64,
    pub quantity: u32,
    pub selected: bool,
}

/// Cart entry joined with live catalog data for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub sku_id: i64,
    pub name: String,
    /// Price in minor units (cents).
    pub price: u64,
    pub default_image_url: String,
    pub quantity: u32,
    pub selected: bool,
}
