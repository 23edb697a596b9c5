//! 路由装配与服务启动

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::app::{
    inventory::handler as inventory, product::handler as product, product::store::ProductStore,
    AppState,
};
use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::config::ServerConfig;

/// 只包含 API 路由，不带中间件
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/products",
            get(product::list_products).post(product::create_product),
        )
        .route("/api/products/:id", get(product::get_product))
        .route("/api/products/:id/stock", patch(product::update_stock))
        .route("/api/inventory/stats", get(inventory::get_stats))
        .route("/api/health", get(inventory::health_check))
}

/// 组装完整应用：路由、共享状态与中间件
pub fn build_app(store: Arc<dyn ProductStore>, request_timeout: Duration) -> Router {
    api_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(TimeoutLayer::new(request_timeout))
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(AppState::new(store))
}

/// 绑定地址并运行服务，直到收到 Ctrl-C
pub async fn serve(config: &ServerConfig, store: Arc<dyn ProductStore>) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = build_app(store, config.timeout());

    let listener = TcpListener::bind(addr).await?;
    info!("🚀 库存服务运行在 http://{}", listener.local_addr()?);
    info!("📖 API 端点:");
    info!("   GET    /api/products            - 产品列表 (支持 search, category)");
    info!("   POST   /api/products            - 创建产品");
    info!("   GET    /api/products/:id        - 获取特定产品");
    info!("   PATCH  /api/products/:id/stock  - 更新库存数量");
    info!("   GET    /api/inventory/stats     - 库存统计");
    info!("   GET    /api/health              - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听 Ctrl-C 信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在关闭服务...");
}
