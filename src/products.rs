//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::items::{NewLineItem, ProductId};

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub title: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Catalog category
    #[serde(default)]
    pub category: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Product images
    #[serde(default)]
    pub images: Vec<String>,

    /// Thumbnail image
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Product {
    /// A single unit of this product, ready to be added to a cart.
    pub fn to_line_item(&self) -> NewLineItem {
        NewLineItem::new(self.id, self.price)
            .with_title(self.title.clone())
            .with_images(self.images.clone())
    }
}
