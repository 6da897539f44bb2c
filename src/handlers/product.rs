// src/handlers/product.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use http::StatusCode;
use tracing::{info, instrument};

use crate::dtos::product::{AddProductRequest, ListProductsQuery, ProductResponse, UpdatePriceQuery};
use crate::error::AppError;
use crate::state::AppState;

// GET /products/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = id?;
    let product = state.product_service.get_by_id(id).await?;

    Ok(Json(ProductResponse::from(product)))
}

// GET /products?store= - List all products, or those of one store
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let Query(query) = query?;
    let products = match query.store.as_deref() {
        Some(store) if !store.is_empty() => {
            state.product_service.get_all_products_by_store(store).await?
        }
        _ => state.product_service.get_all_products().await?,
    };

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<AddProductRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;
    let id = state.product_service.add(payload.into()).await?;
    info!(id, "Product created");

    Ok(StatusCode::CREATED)
}

// PUT /products/{id}?newPrice= - Update product price
#[instrument(skip(state))]
pub async fn update_price(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<UpdatePriceQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let new_price = parse_new_price(query.new_price.as_deref())?;

    state.product_service.update_price(id, new_price).await?;

    Ok(StatusCode::OK)
}

// DELETE /products/{id} - Delete product
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.product_service.delete_by_id(id).await?;

    Ok(StatusCode::OK)
}

fn parse_new_price(raw: Option<&str>) -> Result<f32, AppError> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(AppError::bad_request("parameter newPrice is required")),
    };

    raw.parse::<f32>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| AppError::bad_request("parameter newPrice is not a valid number"))
}
