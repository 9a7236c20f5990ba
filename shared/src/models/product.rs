//! Catalog product models

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A product listed in the marketplace catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub seller_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Decimal>,
}

/// Listings are stored as posted, so display text may be `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Whether this product was listed by the given user
    pub fn is_listed_by(&self, user_id: &str) -> bool {
        self.seller_id == user_id
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Drop every product the given user listed themselves.
///
/// A retailer browsing wholesaler inventory must never be offered their own
/// listings; order of the remaining products is preserved.
pub fn exclude_own_listings(products: Vec<Product>, user_id: &str) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| !p.is_listed_by(user_id))
        .collect()
}

/// Query parameters accepted by `GET /api/products`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductQuery {
    pub available_only: bool,
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub seller_id: Option<String>,
    pub limit: Option<u32>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            available_only: true,
            category_id: None,
            search: None,
            min_price: None,
            max_price: None,
            seller_id: None,
            limit: None,
        }
    }
}

impl ProductQuery {
    /// Products currently in stock, no other filters
    pub fn available() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Flatten into query-string pairs, omitting unset filters
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("available_only", self.available_only.to_string())];

        if let Some(category_id) = &self.category_id {
            pairs.push(("category_id", category_id.clone()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("search", search.to_string()));
            }
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if let Some(seller_id) = &self.seller_id {
            pairs.push(("seller_id", seller_id.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, seller_id: &str) -> Product {
        Product {
            id: id.to_string(),
            seller_id: seller_id.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            price: Decimal::from(10),
            stock: 5,
            image_url: None,
            category_id: None,
            rating: None,
        }
    }

    #[test]
    fn test_exclude_own_listings() {
        let products = vec![
            product("p1", "wh1"),
            product("p2", "ret1"),
            product("p3", "wh2"),
        ];

        let visible = exclude_own_listings(products, "ret1");
        let ids: Vec<&str> = visible.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn test_deserialize_catalog_payload() {
        let json = r#"{
            "id": "p_wh_apple",
            "name": "Apple (WH)",
            "category_id": "c1",
            "price": 70.0,
            "stock": 500,
            "seller_id": "wh1",
            "description": "Fresh red apples",
            "image_url": "https://via.placeholder.com/420x280",
            "rating": 0.0
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::from(70));
        assert_eq!(product.stock, 500);
        assert_eq!(product.category_id.as_deref(), Some("c1"));
        assert!(product.in_stock());
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{"id":"p1","seller_id":"wh1","name":"Milk","price":40,"stock":0}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.image_url.is_none());
        assert!(product.description.is_empty());
        assert!(!product.in_stock());
    }

    #[test]
    fn test_null_display_text_is_empty() {
        let json = r#"{"id":"p2","seller_id":"wh1","name":null,"description":null,"price":12.5,"stock":3}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.name.is_empty());
        assert!(product.description.is_empty());
        assert_eq!(product.price, Decimal::new(125, 1));
    }

    #[test]
    fn test_missing_seller_is_rejected() {
        let json = r#"{"id":"p3","name":"Eggs","price":5,"stock":10}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_default_query_only_requests_available() {
        let pairs = ProductQuery::available().to_query_pairs();
        assert_eq!(pairs, vec![("available_only", "true".to_string())]);
    }

    #[test]
    fn test_query_pairs_skip_blank_search() {
        let pairs = ProductQuery::available()
            .with_search("   ")
            .with_category("c2")
            .with_price_range(Some(Decimal::from(5)), None)
            .to_query_pairs();

        assert!(pairs.contains(&("category_id", "c2".to_string())));
        assert!(pairs.contains(&("min_price", "5".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "search"));
        assert!(!pairs.iter().any(|(k, _)| *k == "max_price"));
    }
}
