//! 库存统计与健康检查处理器

use axum::{extract::State, response::Json};
use serde::Serialize;

use super::model::InventoryStats;
use crate::app::AppState;
use crate::core::error::CoreError;

/// GET /api/inventory/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<InventoryStats>, CoreError> {
    let stats = state.product_service.stats()?;
    Ok(Json(stats))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub product_count: usize,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthStatus>, CoreError> {
    let product_count = state.product_service.count()?;
    Ok(Json(HealthStatus {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        product_count,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
