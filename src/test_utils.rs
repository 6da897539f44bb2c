// src/test_utils.rs
#![allow(dead_code)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::error::{CatalogError, CatalogResult};
use crate::models::product::{NewProduct, Product};
use crate::repositories::product::ProductRepository;
use crate::services::product::ProductService;
use crate::state::AppState;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct Table {
    rows: Vec<Product>,
    last_id: i64,
}

/// Vec-backed stand-in for the Postgres repository. Ids increase
/// monotonically and are never reused, like a `serial` column.
#[derive(Default)]
pub(crate) struct InMemoryProductRepository {
    table: Mutex<Table>,
    failing: AtomicBool,
}

impl InMemoryProductRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        let last_id = products.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            table: Mutex::new(Table { rows: products, last_id }),
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail as if the backend were unreachable.
    pub(crate) fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }

    fn check_backend(&self) -> CatalogResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Storage(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all_products(&self) -> CatalogResult<Vec<Product>> {
        self.check_backend()?;
        Ok(self.table.lock().unwrap().rows.clone())
    }

    async fn get_all_products_by_store(&self, store: &str) -> CatalogResult<Vec<Product>> {
        self.check_backend()?;
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|p| p.store == store)
            .cloned()
            .collect())
    }

    async fn add_product(&self, product: NewProduct) -> CatalogResult<i64> {
        self.check_backend()?;
        let mut table = self.table.lock().unwrap();
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(Product {
            id,
            name: product.name,
            price: product.price,
            discount: product.discount,
            store: product.store,
        });
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Product> {
        self.check_backend()?;
        self.table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn delete_by_id(&self, id: i64) -> CatalogResult<()> {
        self.check_backend()?;
        let mut table = self.table.lock().unwrap();
        let index = table
            .rows
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        table.rows.remove(index);
        Ok(())
    }

    async fn update_price(&self, id: i64, new_price: f32) -> CatalogResult<()> {
        self.check_backend()?;
        if let Some(product) = self
            .table
            .lock()
            .unwrap()
            .rows
            .iter_mut()
            .find(|p| p.id == id)
        {
            product.price = new_price;
        }
        Ok(())
    }
}

pub(crate) fn product(id: i64, name: &str, price: f32, discount: f32, store: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        discount,
        store: store.to_string(),
    }
}

/// Full router wired to the given repository, as `main` wires it to Postgres.
pub(crate) fn test_app(repository: Arc<InMemoryProductRepository>) -> Router {
    let service = ProductService::new(repository);
    crate::routes::create_app(AppState::new(service))
}
