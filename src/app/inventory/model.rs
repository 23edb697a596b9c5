//! 库存统计

use serde::{Deserialize, Serialize};

use crate::app::product::model::Product;

/// 低库存阈值（含）
pub const LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
}

impl InventoryStats {
    /// 每次都从完整列表重新计算，不做缓存
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |mut stats, product| {
            stats.total_products += 1;
            match product.quantity {
                0 => stats.out_of_stock_count += 1,
                q if q <= LOW_STOCK_THRESHOLD => stats.low_stock_count += 1,
                _ => {}
            }
            stats
        })
    }
}
