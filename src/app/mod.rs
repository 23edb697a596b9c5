//! 应用层：产品、库存统计与用户

pub mod inventory;
pub mod product;
pub mod user;

use std::sync::Arc;

use product::{service::ProductService, store::ProductStore};

/// 路由共享状态，存储实例在启动时注入
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            product_service: ProductService::new(store),
        }
    }
}
