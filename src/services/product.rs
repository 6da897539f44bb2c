// src/services/product.rs
use std::sync::Arc;

use crate::error::{CatalogError, CatalogResult};
use crate::models::product::{Product, ProductCreate};
use crate::repositories::product::ProductRepository;

/// Highest discount, in percent, a new product may carry.
pub const MAX_DISCOUNT: f32 = 70.0;

/// Business rules for new products. Only the discount is checked; name,
/// price and store are accepted as given.
pub fn validate_product_create(product: &ProductCreate) -> CatalogResult<()> {
    if product.discount > MAX_DISCOUNT {
        return Err(CatalogError::Validation(format!(
            "discount exceeds maximum of {MAX_DISCOUNT}"
        )));
    }
    Ok(())
}

/// Entry point for the transport layer. Validates writes and otherwise
/// hands straight through to the repository.
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Returns the id assigned to the new product.
    pub async fn add(&self, product: ProductCreate) -> CatalogResult<i64> {
        validate_product_create(&product)?;
        self.repository.add_product(product.into()).await
    }

    pub async fn delete_by_id(&self, id: i64) -> CatalogResult<()> {
        self.repository.delete_by_id(id).await
    }

    pub async fn get_by_id(&self, id: i64) -> CatalogResult<Product> {
        self.repository.get_by_id(id).await
    }

    pub async fn update_price(&self, id: i64, new_price: f32) -> CatalogResult<()> {
        self.repository.update_price(id, new_price).await
    }

    pub async fn get_all_products(&self) -> CatalogResult<Vec<Product>> {
        self.repository.get_all_products().await
    }

    pub async fn get_all_products_by_store(&self, store: &str) -> CatalogResult<Vec<Product>> {
        self.repository.get_all_products_by_store(store).await
    }
}
