//! 产品处理器

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use super::model::{InsertProduct, ListProductsQuery, Product, UpdateStock};
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::extract::{lookup_id, parse_id, ValidatedJson};

/// GET /api/products?search=&category=
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = state.product_service.list_products(&query)?;
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let id = lookup_id(&id).ok_or_else(CoreError::product_not_found)?;
    let product = state.product_service.get_product(id)?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InsertProduct>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let product = state.product_service.create_product(payload)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/products/:id/stock
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateStock>,
) -> Result<Json<Product>, CoreError> {
    let id = parse_id(&id)?.ok_or_else(CoreError::product_not_found)?;
    let product = state
        .product_service
        .update_stock(id, payload.quantity())?;
    Ok(Json(product))
}
