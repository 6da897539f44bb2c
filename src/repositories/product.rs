// src/repositories/product.rs
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::models::product::{NewProduct, Product};

/// Persistence seam for products. The service only ever talks to this trait,
/// so an in-memory implementation can stand in for Postgres in tests.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all_products(&self) -> CatalogResult<Vec<Product>>;

    async fn get_all_products_by_store(&self, store: &str) -> CatalogResult<Vec<Product>>;

    /// Inserts the product and returns the id assigned by storage.
    async fn add_product(&self, product: NewProduct) -> CatalogResult<i64>;

    async fn get_by_id(&self, id: i64) -> CatalogResult<Product>;

    async fn delete_by_id(&self, id: i64) -> CatalogResult<()>;

    /// Succeeds without touching anything when `id` does not exist.
    async fn update_price(&self, id: i64, new_price: f32) -> CatalogResult<()>;
}

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self))]
    async fn get_all_products(&self) -> CatalogResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT id::INT8 AS id, name, price, discount, store FROM products",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(?e, "Failed to fetch products");
            CatalogError::from(e)
        })
    }

    #[instrument(skip(self))]
    async fn get_all_products_by_store(&self, store: &str) -> CatalogResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT id::INT8 AS id, name, price, discount, store
             FROM products WHERE store = $1",
        )
        .bind(store)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(?e, store, "Failed to fetch products for store");
            CatalogError::from(e)
        })
    }

    #[instrument(skip(self, product), fields(name = %product.name, store = %product.store))]
    async fn add_product(&self, product: NewProduct) -> CatalogResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO products (name, price, discount, store)
             VALUES ($1, $2, $3, $4) RETURNING id::INT8",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.discount)
        .bind(&product.store)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(?e, "Failed to insert product");
            CatalogError::from(e)
        })?;

        info!(id, "Product added");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> CatalogResult<Product> {
        sqlx::query_as::<_, Product>(
            "SELECT id::INT8 AS id, name, price, discount, store
             FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> CatalogResult<()> {
        self.get_by_id(id).await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(?e, "Failed to delete product");
                CatalogError::from(e)
            })?;

        check_deleted(result.rows_affected())?;

        info!("Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_price(&self, id: i64, new_price: f32) -> CatalogResult<()> {
        let result = sqlx::query("UPDATE products SET price = $1 WHERE id = $2")
            .bind(new_price)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(?e, "Failed to update product price");
                CatalogError::from(e)
            })?;

        if result.rows_affected() == 0 {
            warn!("Price update matched no product");
        } else {
            info!("Product price updated");
        }
        Ok(())
    }
}

/// A delete that follows a successful lookup but touches no row lost a race
/// with a concurrent delete; the statement is reported as a storage failure.
fn check_deleted(rows_affected: u64) -> CatalogResult<()> {
    if rows_affected == 0 {
        error!("Product vanished between lookup and delete");
        return Err(CatalogError::Storage(sqlx::Error::RowNotFound));
    }
    Ok(())
}
