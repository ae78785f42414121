//! Client-held anonymous cart token.
//!
//! The anonymous cart is a base64url-encoded JSON map carried in a cookie.
//! A token that fails to decode is treated as an empty cart: a corrupt
//! cookie must never fail the request.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::domain::carts::models::CartEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct AnonymousEntry {
    quantity: u32,
    selected: bool,
}

/// Cart state for an identity that has not logged in yet.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymousCart {
    entries: FxHashMap<i64, AnonymousEntry>,
}

impl AnonymousCart {
    /// Decode a client-held token, failing open to an empty cart.
    #[must_use]
    pub fn decode(token: &str) -> Self {
        URL_SAFE_NO_PAD
            .decode(token)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    /// Encode for the round trip back to the client.
    ///
    /// # Errors
    ///
    /// Returns an error when JSON serialisation fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?))
    }

    /// Increment the quantity for an existing entry (overwriting its
    /// selection flag), or create the entry.
    pub fn add(&mut self, sku_id: i64, quantity: u32, selected: bool) {
        self.entries
            .entry(sku_id)
            .and_modify(|entry| {
                entry.quantity = entry.quantity.saturating_add(quantity);
                entry.selected = selected;
            })
            .or_insert(AnonymousEntry { quantity, selected });
    }

    /// Unconditionally overwrite quantity and selection.
    pub fn set(&mut self, sku_id: i64, quantity: u32, selected: bool) {
        self.entries
            .insert(sku_id, AnonymousEntry { quantity, selected });
    }

    /// Remove an entry; no-op when absent.
    pub fn remove(&mut self, sku_id: i64) {
        self.entries.remove(&sku_id);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = CartEntry> + '_ {
        self.entries.iter().map(|(&sku_id, entry)| CartEntry {
            sku_id,
            quantity: entry.quantity,
            selected: entry.selected,
        })
    }

    pub fn sku_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn add_creates_then_increments() {
        let mut cart = AnonymousCart::default();

        cart.add(7, 2, true);
        cart.add(7, 3, false);

        let entries: Vec<CartEntry> = cart.entries().collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 5);
        assert!(!entries[0].selected, "selection must follow the latest add");
    }

    #[test]
    fn set_overwrites_quantity_and_selection() {
        let mut cart = AnonymousCart::default();

        cart.add(7, 2, true);
        cart.set(7, 1, false);

        let entries: Vec<CartEntry> = cart.entries().collect();

        assert_eq!(entries[0].quantity, 1);
        assert!(!entries[0].selected, "selection must be overwritten by set");
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let mut cart = AnonymousCart::default();

        cart.add(7, 2, true);
        cart.remove(8);
        cart.remove(7);
        cart.remove(7);

        assert!(cart.is_empty(), "cart should be empty after removals");
    }

    #[test]
    fn round_trip_preserves_entries() -> TestResult {
        let mut cart = AnonymousCart::default();

        cart.add(1, 4, true);
        cart.add(2, 1, false);

        assert_eq!(AnonymousCart::decode(&cart.encode()?), cart);

        Ok(())
    }

    #[test]
    fn corrupt_token_decodes_as_empty() {
        assert!(AnonymousCart::decode("not base64 at all!").is_empty());
        assert!(AnonymousCart::decode(&URL_SAFE_NO_PAD.encode(b"not json")).is_empty());
        assert!(AnonymousCart::decode("").is_empty());
    }
}
