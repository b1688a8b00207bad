//! Local copy of the backend's inventory listing.

use chrono::{DateTime, Utc};

use crate::domain::{Product, ProductId};

/// The last-fetched list of sellable products.
///
/// The only write path is [`CatalogCache::replace`]: a refresh swaps the
/// whole listing so readers never observe a half-applied update.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    products: Vec<Product>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.last_refreshed = Some(Utc::now());
    }

    /// Drops the listing, e.g. when the cashier logs out.
    pub fn clear(&mut self) {
        self.products.clear();
        self.last_refreshed = None;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Case-insensitive exact name match.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim().to_lowercase();
        self.products.iter().find(|p| p.name.to_lowercase() == name)
    }

    /// Case-insensitive substring filter in catalog order. An empty query
    /// matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Product> + 'a {
        let query = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(move |p| p.name.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn listing() -> Vec<Product> {
        vec![
            Product::new(1, "Brown Sugar 1kg", dec!(2.10), 8),
            Product::new(2, "White Sugar 2kg", dec!(3.40), 0),
            Product::new(3, "Rice 5kg", dec!(9.99), 14),
        ]
    }

    #[test]
    fn test_replace_swaps_whole_listing() {
        let mut catalog = CatalogCache::new();
        assert!(catalog.last_refreshed().is_none());

        catalog.replace(listing());
        assert_eq!(catalog.len(), 3);
        assert!(catalog.last_refreshed().is_some());

        catalog.replace(vec![Product::new(7, "Salt", dec!(0.80), 3)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(ProductId(1)).is_none());
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let mut catalog = CatalogCache::new();
        catalog.replace(listing());

        assert_eq!(catalog.get(ProductId(3)).map(|p| p.name.as_str()), Some("Rice 5kg"));
        assert_eq!(catalog.find_by_name("  rice 5KG ").map(|p| p.id), Some(ProductId(3)));
        assert!(catalog.find_by_name("rice").is_none());
    }

    #[test]
    fn test_search_filters_by_substring_in_order() {
        let mut catalog = CatalogCache::new();
        catalog.replace(listing());

        let hits: Vec<ProductId> = catalog.search("SUGAR").map(|p| p.id).collect();
        assert_eq!(hits, vec![ProductId(1), ProductId(2)]);
        assert_eq!(catalog.search("").count(), 3);
        assert_eq!(catalog.search("flour").count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut catalog = CatalogCache::new();
        catalog.replace(listing());
        catalog.clear();
        assert!(catalog.is_empty());
        assert!(catalog.last_refreshed().is_none());
    }
}
