// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::models::product::{Product, ProductCreate};

#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub name: String,
    pub price: f32,
    pub discount: f32,
    pub store: String,
}

impl From<AddProductRequest> for ProductCreate {
    fn from(req: AddProductRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            discount: req.discount,
            store: req.store,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub store: Option<String>,
}

/// `newPrice` is kept as raw text so a missing value and a malformed one
/// can be reported separately.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePriceQuery {
    #[serde(rename = "newPrice")]
    pub new_price: Option<String>,
}

// Product ids never leave the service.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub name: String,
    pub price: f32,
    pub discount: f32,
    pub store: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            price: product.price,
            discount: product.discount,
            store: product.store,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "errorDescription")]
    pub error_description: String,
}
