//! # 库存管理服务
//!
//! 基于 Axum 的库存 REST 服务，分层结构：
//! - `app`: 产品、库存统计与用户的模型、存储接口、服务和处理器
//! - `core`: 错误处理、请求提取器、中间件
//! - `infrastructure`: 配置、日志与内存存储
//! - `server`: 路由装配与启动

pub mod app;
pub mod core;
pub mod infrastructure;
pub mod server;

pub use app::AppState;
pub use server::{api_routes, build_app, serve};
