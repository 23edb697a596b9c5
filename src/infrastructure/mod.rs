//! 基础设施层：配置、日志与存储

pub mod config;
pub mod logger;
pub mod memory;
