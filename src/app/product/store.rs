//! 产品存储抽象

use super::model::{InsertProduct, Product, ProductId};
use crate::core::error::StoreResult;

/// 产品存储接口
///
/// 默认实现为 [`MemStorage`](crate::infrastructure::memory::MemStorage)，
/// 换成其他后端时只需实现该 trait。
pub trait ProductStore: Send + Sync {
    /// 创建产品并分配 ID，`sku` 重复时返回 `StoreError::DuplicateSku`
    fn create(&self, input: InsertProduct) -> StoreResult<Product>;

    /// 按创建顺序返回全部产品
    fn get_all(&self) -> StoreResult<Vec<Product>>;

    fn get_by_id(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// 整体替换库存数量，产品不存在时返回 `None`
    fn update_stock(&self, id: ProductId, quantity: u32) -> StoreResult<Option<Product>>;

    /// 对 name、description、sku 做不区分大小写的子串匹配，空串返回全部
    fn search(&self, query: &str) -> StoreResult<Vec<Product>>;

    /// 对 category 做不区分大小写的完全匹配，空串返回全部
    fn filter_by_category(&self, category: &str) -> StoreResult<Vec<Product>>;
}

pub(crate) fn matches_search(product: &Product, lower_query: &str) -> bool {
    product.name.to_lowercase().contains(lower_query)
        || product.description.to_lowercase().contains(lower_query)
        || product.sku.to_lowercase().contains(lower_query)
}

pub(crate) fn matches_category(product: &Product, category: &str) -> bool {
    product.category.to_lowercase() == category.to_lowercase()
}
