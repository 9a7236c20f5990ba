//! Product grid state

use serde::{Deserialize, Serialize};

use super::Product;

/// Lifecycle of the product list: `Idle → Loading → (Loaded | Failed)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ProductListState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Product>),
    /// The fetch failed; the grid shows no products
    Failed(String),
}

/// What the product grid renders
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductListView<'a> {
    Loading,
    /// The list settled with nothing to show
    Empty,
    Products(&'a [Product]),
}

impl ProductListState {
    pub fn view(&self) -> ProductListView<'_> {
        match self {
            ProductListState::Idle | ProductListState::Loading => ProductListView::Loading,
            ProductListState::Loaded(products) if !products.is_empty() => {
                ProductListView::Products(products)
            }
            ProductListState::Loaded(_) | ProductListState::Failed(_) => ProductListView::Empty,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ProductListState::Idle | ProductListState::Loading)
    }

    /// Products currently on screen, empty unless loaded
    pub fn products(&self) -> &[Product] {
        match self {
            ProductListState::Loaded(products) => products,
            _ => &[],
        }
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products().iter().find(|p| p.id == product_id)
    }
}
