//! 产品数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 产品 ID，由存储层在创建时分配
pub type ProductId = u64;

/// 库存数量上限，与原数据表 integer 列的取值范围一致
///
/// 校验属性里的 `max` 字面量必须与此值相同。
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub sku: String,
    pub quantity: u32,
}

/// 创建产品请求
///
/// `quantity` 缺省或为 `null` 时按 0 处理。
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct InsertProduct {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,

    #[serde(default)]
    // max 与 MAX_QUANTITY 保持一致
    #[validate(range(min = 0, max = 2147483647, message = "Quantity must be 0 or greater"))]
    pub quantity: Option<i64>,
}

impl InsertProduct {
    /// 校验通过后的库存数量
    pub fn initial_quantity(&self) -> u32 {
        self.quantity
            .and_then(|q| u32::try_from(q.clamp(0, MAX_QUANTITY)).ok())
            .unwrap_or(0)
    }
}

/// 更新库存请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UpdateStock {
    // max 与 MAX_QUANTITY 保持一致
    #[validate(range(min = 0, max = 2147483647, message = "Quantity must be 0 or greater"))]
    pub quantity: i64,
}

impl UpdateStock {
    pub fn quantity(&self) -> u32 {
        u32::try_from(self.quantity.clamp(0, MAX_QUANTITY)).unwrap_or(0)
    }
}

/// 产品列表查询参数
///
/// 同时给出 `search` 和 `category` 时以 `search` 为准。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// 列表查询实际使用的筛选方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter<'a> {
    All,
    Search(&'a str),
    Category(&'a str),
}

impl ListProductsQuery {
    pub fn filter(&self) -> ProductFilter<'_> {
        match (self.search.as_deref(), self.category.as_deref()) {
            (Some(search), _) if !search.is_empty() => ProductFilter::Search(search),
            (_, Some(category)) if !category.is_empty() => ProductFilter::Category(category),
            _ => ProductFilter::All,
        }
    }
}
