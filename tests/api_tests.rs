use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use inventory_tracker::app::inventory::model::InventoryStats;
use inventory_tracker::app::product::model::{InsertProduct, Product, ProductId};
use inventory_tracker::app::product::store::ProductStore;
use inventory_tracker::build_app;
use inventory_tracker::core::error::{StoreError, StoreResult};
use inventory_tracker::infrastructure::memory::MemStorage;
use serde_json::{json, Value};

fn server_with(storage: MemStorage) -> TestServer {
    let app = build_app(Arc::new(storage), Duration::from_secs(5));
    TestServer::new(app).unwrap()
}

fn empty_server() -> TestServer {
    server_with(MemStorage::new())
}

fn seeded_server() -> TestServer {
    server_with(MemStorage::with_sample_products().unwrap())
}

fn widget() -> Value {
    json!({
        "name": "Widget",
        "description": "d",
        "category": "Tools",
        "sku": "W-1",
        "quantity": 2
    })
}

#[tokio::test]
async fn test_create_then_update_stock_reflects_in_stats() {
    let server = empty_server();

    let response = server.post("/api/products").json(&widget()).await;
    response.assert_status(StatusCode::CREATED);
    let created: Product = response.json();
    assert_eq!(created.id, 1);
    assert_eq!(created.quantity, 2);
    assert_eq!(created.sku, "W-1");

    let stats: InventoryStats = server.get("/api/inventory/stats").await.json();
    assert_eq!(stats.total_products, 1);
    assert_eq!(stats.low_stock_count, 1);
    assert_eq!(stats.out_of_stock_count, 0);

    let response = server
        .patch(&format!("/api/products/{}/stock", created.id))
        .json(&json!({ "quantity": 0 }))
        .await;
    response.assert_status_ok();
    let updated: Product = response.json();
    assert_eq!(
        updated,
        Product {
            quantity: 0,
            ..created.clone()
        }
    );

    let stats: InventoryStats = server.get("/api/inventory/stats").await.json();
    assert_eq!(stats.out_of_stock_count, 1);
    assert_eq!(stats.low_stock_count, 0);

    let fetched: Product = server
        .get(&format!("/api/products/{}", created.id))
        .await
        .json();
    assert_eq!(fetched.quantity, 0);
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn test_quantity_defaults_to_zero() {
    let server = empty_server();

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": "Bolt",
            "description": "M6 bolt",
            "category": "Hardware",
            "sku": "B-6"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Product = response.json();
    assert_eq!(created.quantity, 0);
}

#[tokio::test]
async fn test_product_json_shape() {
    let server = empty_server();
    server.post("/api/products").json(&widget()).await;

    let body: Value = server.get("/api/products/1").await.json();
    assert_eq!(
        body,
        json!({
            "id": 1,
            "name": "Widget",
            "description": "d",
            "category": "Tools",
            "sku": "W-1",
            "quantity": 2
        })
    );
}

#[tokio::test]
async fn test_get_unknown_product_is_not_found() {
    let server = seeded_server();

    let response = server.get("/api/products/999").await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["message"], "Product not found");
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_get_unaddressable_id_is_not_found() {
    let server = seeded_server();

    for path in ["/api/products/-1", "/api/products/abc", "/api/products/1.5"] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["message"], "Product not found");
    }
}

#[tokio::test]
async fn test_update_stock_id_handling() {
    let server = seeded_server();

    server
        .patch("/api/products/abc/stock")
        .json(&json!({ "quantity": 1 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .patch("/api/products/-1/stock")
        .json(&json!({ "quantity": 1 }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_create_validation_errors() {
    let server = empty_server();

    let mut missing_sku = widget();
    missing_sku.as_object_mut().unwrap().remove("sku");
    server
        .post("/api/products")
        .json(&missing_sku)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut empty_sku = widget();
    empty_sku["sku"] = json!("");
    let response = server.post("/api/products").json(&empty_sku).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "SKU is required");

    let mut negative = widget();
    negative["quantity"] = json!(-5);
    server
        .post("/api/products")
        .json(&negative)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut wrong_type = widget();
    wrong_type["quantity"] = json!("lots");
    server
        .post("/api/products")
        .json(&wrong_type)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // 校验失败不应写入任何数据
    let products: Vec<Product> = server.get("/api/products").await.json();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_duplicate_sku_is_conflict() {
    let server = empty_server();

    server
        .post("/api/products")
        .json(&widget())
        .await
        .assert_status(StatusCode::CREATED);

    let mut duplicate = widget();
    duplicate["name"] = json!("Another widget");
    let response = server.post("/api/products").json(&duplicate).await;
    response.assert_status(StatusCode::CONFLICT);

    let products: Vec<Product> = server.get("/api/products").await.json();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Widget");
}

#[tokio::test]
async fn test_update_stock_rejects_invalid_quantity() {
    let server = seeded_server();

    let response = server
        .patch("/api/products/1/stock")
        .json(&json!({ "quantity": -1 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Quantity must be 0 or greater");

    server
        .patch("/api/products/1/stock")
        .json(&json!({ "quantity": 2.5 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .patch("/api/products/1/stock")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .patch("/api/products/1/stock")
        .text("{\"quantity\": ")
        .content_type("application/json")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // 原库存保持不变
    let product: Product = server.get("/api/products/1").await.json();
    assert_eq!(product.quantity, 15);
}

#[tokio::test]
async fn test_update_stock_unknown_id_does_not_create() {
    let server = seeded_server();

    server
        .patch("/api/products/42/stock")
        .json(&json!({ "quantity": 3 }))
        .await
        .assert_status_not_found();

    server.get("/api/products/42").await.assert_status_not_found();
    let products: Vec<Product> = server.get("/api/products").await.json();
    assert_eq!(products.len(), 6);
}

#[tokio::test]
async fn test_list_search_and_category() {
    let server = seeded_server();

    let all: Vec<Product> = server.get("/api/products").await.json();
    let ids: Vec<u64> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

    let searched: Vec<Product> = server
        .get("/api/products")
        .add_query_param("search", "MOUSE")
        .await
        .json();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].name, "Wireless Mouse");

    let by_category: Vec<Product> = server
        .get("/api/products")
        .add_query_param("category", "furniture")
        .await
        .json();
    let names: Vec<&str> = by_category.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Office Chair Deluxe", "Standing Desk"]);

    let no_match: Vec<Product> = server
        .get("/api/products")
        .add_query_param("search", "zzz-not-here")
        .await
        .json();
    assert!(no_match.is_empty());

    let empty_params: Vec<Product> = server
        .get("/api/products")
        .add_query_param("search", "")
        .add_query_param("category", "")
        .await
        .json();
    assert_eq!(empty_params.len(), 6);
}

#[tokio::test]
async fn test_search_takes_precedence_over_category() {
    let server = seeded_server();

    let products: Vec<Product> = server
        .get("/api/products")
        .add_query_param("search", "desk")
        .add_query_param("category", "Electronics")
        .await
        .json();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].sku, "DESK-STD-48");
}

#[tokio::test]
async fn test_seeded_stats() {
    let server = seeded_server();

    let body: Value = server.get("/api/inventory/stats").await.json();
    assert_eq!(
        body,
        json!({ "totalProducts": 6, "lowStockCount": 2, "outOfStockCount": 1 })
    );
}

#[tokio::test]
async fn test_health_and_request_id() {
    let server = seeded_server();

    let response = server.get("/api/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["productCount"], 6);

    let request_id = response.header("x-request-id");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

/// 所有操作都返回存储错误的后端
struct BrokenStore;

impl ProductStore for BrokenStore {
    fn create(&self, _input: InsertProduct) -> StoreResult<Product> {
        Err(StoreError::LockPoisoned("products"))
    }

    fn get_all(&self) -> StoreResult<Vec<Product>> {
        Err(StoreError::LockPoisoned("products"))
    }

    fn get_by_id(&self, _id: ProductId) -> StoreResult<Option<Product>> {
        Err(StoreError::LockPoisoned("products"))
    }

    fn update_stock(&self, _id: ProductId, _quantity: u32) -> StoreResult<Option<Product>> {
        Err(StoreError::LockPoisoned("products"))
    }

    fn search(&self, _query: &str) -> StoreResult<Vec<Product>> {
        Err(StoreError::LockPoisoned("products"))
    }

    fn filter_by_category(&self, _category: &str) -> StoreResult<Vec<Product>> {
        Err(StoreError::LockPoisoned("products"))
    }
}

#[tokio::test]
async fn test_store_failures_are_generic_internal_errors() {
    let server = TestServer::new(build_app(Arc::new(BrokenStore), Duration::from_secs(5))).unwrap();

    let response = server.get("/api/products").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to fetch products");
    assert_eq!(body["error"], "INTERNAL_SERVER_ERROR");

    let response = server.get("/api/inventory/stats").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to fetch inventory statistics");

    let response = server.post("/api/products").json(&widget()).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to create product");

    // 校验先于存储执行
    server
        .patch("/api/products/1/stock")
        .json(&json!({ "quantity": -1 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .patch("/api/products/1/stock")
        .json(&json!({ "quantity": 1 }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to update product stock");
}
