// src/models/product.rs
use sqlx::FromRow;

/// A persisted catalog entry. `id` is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f32,
    pub discount: f32,
    pub store: String,
}

/// Input for creating a product, checked by the validator before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub price: f32,
    pub discount: f32,
    pub store: String,
}

/// Row handed to the repository for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f32,
    pub discount: f32,
    pub store: String,
}

impl From<ProductCreate> for NewProduct {
    fn from(create: ProductCreate) -> Self {
        Self {
            name: create.name,
            price: create.price,
            discount: create.discount,
            store: create.store,
        }
    }
}
