//! 产品业务服务

use std::sync::Arc;

use tracing::info;

use super::model::{InsertProduct, ListProductsQuery, Product, ProductFilter, ProductId};
use super::store::ProductStore;
use crate::app::inventory::model::InventoryStats;
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn list_products(&self, query: &ListProductsQuery) -> Result<Vec<Product>, CoreError> {
        let result = match query.filter() {
            ProductFilter::Search(search) => self.store.search(search),
            ProductFilter::Category(category) => self.store.filter_by_category(category),
            ProductFilter::All => self.store.get_all(),
        };
        result.map_err(|e| CoreError::from_store(e, "Failed to fetch products"))
    }

    pub fn get_product(&self, id: ProductId) -> Result<Product, CoreError> {
        self.store
            .get_by_id(id)
            .map_err(|e| CoreError::from_store(e, "Failed to fetch product"))?
            .ok_or_else(CoreError::product_not_found)
    }

    pub fn create_product(&self, input: InsertProduct) -> Result<Product, CoreError> {
        let product = self
            .store
            .create(input)
            .map_err(|e| CoreError::from_store(e, "Failed to create product"))?;
        info!(id = product.id, sku = %product.sku, "产品创建成功");
        Ok(product)
    }

    pub fn update_stock(&self, id: ProductId, quantity: u32) -> Result<Product, CoreError> {
        let product = self
            .store
            .update_stock(id, quantity)
            .map_err(|e| CoreError::from_store(e, "Failed to update product stock"))?
            .ok_or_else(CoreError::product_not_found)?;
        info!(id, quantity, "库存更新成功");
        Ok(product)
    }

    pub fn stats(&self) -> Result<InventoryStats, CoreError> {
        let products = self
            .store
            .get_all()
            .map_err(|e| CoreError::from_store(e, "Failed to fetch inventory statistics"))?;
        Ok(InventoryStats::from_products(&products))
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        self.store
            .get_all()
            .map(|products| products.len())
            .map_err(|e| CoreError::from_store(e, "Failed to fetch products"))
    }
}
