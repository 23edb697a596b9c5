//! 内存存储
//!
//! 每张表由一把读写锁保护：读操作可以并行，写操作串行执行。
//! 并发更新同一产品库存时后写入者生效，不做版本校验。

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::app::product::model::{InsertProduct, Product, ProductId};
use crate::app::product::store::{matches_category, matches_search, ProductStore};
use crate::app::user::model::{InsertUser, User, UserId};
use crate::app::user::store::UserStore;
use crate::core::error::{StoreError, StoreResult};

#[derive(Debug)]
struct ProductTable {
    rows: HashMap<ProductId, Product>,
    skus: HashSet<String>,
    next_id: ProductId,
}

impl ProductTable {
    /// 按 ID 升序即创建顺序
    fn ordered(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.rows.values().cloned().collect();
        products.sort_by_key(|p| p.id);
        products
    }
}

#[derive(Debug)]
struct UserTable {
    rows: HashMap<UserId, User>,
    next_id: UserId,
}

#[derive(Debug)]
pub struct MemStorage {
    products: RwLock<ProductTable>,
    users: RwLock<UserTable>,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            products: RwLock::new(ProductTable {
                rows: HashMap::new(),
                skus: HashSet::new(),
                next_id: 1,
            }),
            users: RwLock::new(UserTable {
                rows: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// 创建存储并写入示例产品
    pub fn with_sample_products() -> StoreResult<Self> {
        let storage = Self::new();
        for product in sample_products() {
            storage.create(product)?;
        }
        info!("✅ 已初始化 {} 个示例产品", storage.read_products()?.rows.len());
        Ok(storage)
    }

    fn read_products(&self) -> StoreResult<RwLockReadGuard<'_, ProductTable>> {
        self.products
            .read()
            .map_err(|_| StoreError::LockPoisoned("products"))
    }

    fn write_products(&self) -> StoreResult<RwLockWriteGuard<'_, ProductTable>> {
        self.products
            .write()
            .map_err(|_| StoreError::LockPoisoned("products"))
    }

    fn read_users(&self) -> StoreResult<RwLockReadGuard<'_, UserTable>> {
        self.users.read().map_err(|_| StoreError::LockPoisoned("users"))
    }

    fn write_users(&self) -> StoreResult<RwLockWriteGuard<'_, UserTable>> {
        self.users.write().map_err(|_| StoreError::LockPoisoned("users"))
    }
}

impl ProductStore for MemStorage {
    fn create(&self, input: InsertProduct) -> StoreResult<Product> {
        let quantity = input.initial_quantity();
        let mut table = self.write_products()?;

        if table.skus.contains(&input.sku) {
            return Err(StoreError::DuplicateSku(input.sku));
        }

        let id = table.next_id;
        table.next_id += 1;

        let product = Product {
            id,
            name: input.name,
            description: input.description,
            category: input.category,
            sku: input.sku,
            quantity,
        };
        table.skus.insert(product.sku.clone());
        table.rows.insert(id, product.clone());

        debug!(id, sku = %product.sku, "product created");
        Ok(product)
    }

    fn get_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read_products()?.ordered())
    }

    fn get_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.read_products()?.rows.get(&id).cloned())
    }

    fn update_stock(&self, id: ProductId, quantity: u32) -> StoreResult<Option<Product>> {
        let mut table = self.write_products()?;
        Ok(table.rows.get_mut(&id).map(|product| {
            debug!(id, from = product.quantity, to = quantity, "stock updated");
            product.quantity = quantity;
            product.clone()
        }))
    }

    fn search(&self, query: &str) -> StoreResult<Vec<Product>> {
        let products = self.read_products()?.ordered();
        if query.is_empty() {
            return Ok(products);
        }

        let lower_query = query.to_lowercase();
        Ok(products
            .into_iter()
            .filter(|p| matches_search(p, &lower_query))
            .collect())
    }

    fn filter_by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
        let products = self.read_products()?.ordered();
        if category.is_empty() {
            return Ok(products);
        }

        Ok(products
            .into_iter()
            .filter(|p| matches_category(p, category))
            .collect())
    }
}

impl UserStore for MemStorage {
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.read_users()?.rows.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .read_users()?
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    fn create_user(&self, input: InsertUser) -> StoreResult<User> {
        let mut table = self.write_users()?;

        if table.rows.values().any(|u| u.username == input.username) {
            return Err(StoreError::DuplicateUsername(input.username));
        }

        let id = table.next_id;
        table.next_id += 1;

        let user = User {
            id,
            username: input.username,
            password: input.password,
        };
        table.rows.insert(id, user.clone());
        Ok(user)
    }
}

fn sample_products() -> Vec<InsertProduct> {
    let product = |name: &str, description: &str, category: &str, sku: &str, quantity: i64| {
        InsertProduct {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            sku: sku.to_string(),
            quantity: Some(quantity),
        }
    };

    vec![
        product(
            "MacBook Pro 14\"",
            "Apple M2 chip, 16GB RAM, 512GB SSD",
            "Electronics",
            "MBP-14-M2-512",
            15,
        ),
        product(
            "Office Chair Deluxe",
            "Ergonomic design with lumbar support",
            "Furniture",
            "CHAIR-DLX-001",
            8,
        ),
        product(
            "A4 Copy Paper",
            "White, 80gsm, 500 sheets per pack",
            "Office",
            "PAPER-A4-500",
            3,
        ),
        product(
            "Cordless Drill Set",
            "18V Li-ion with 20-piece bit set",
            "Tools",
            "DRILL-18V-SET",
            0,
        ),
        product(
            "Wireless Mouse",
            "Bluetooth 5.0, ergonomic design",
            "Electronics",
            "MOUSE-BT-001",
            25,
        ),
        product(
            "Standing Desk",
            "Height adjustable, 48\" width",
            "Furniture",
            "DESK-STD-48",
            5,
        ),
    ]
}
