use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use inventory_tracker::app::product::store::ProductStore;
use inventory_tracker::infrastructure::{config::load_config, logger::Logger, memory::MemStorage};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 第一个参数可指定配置文件路径
    let config_path = env::args().nth(1).map(PathBuf::from);
    let (config, source) = load_config(config_path.as_deref())?;

    let _guard = Logger::init(&config.logging)?;

    match &source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let store: Arc<dyn ProductStore> = if config.store.seed_sample_data {
        Arc::new(MemStorage::with_sample_products()?)
    } else {
        Arc::new(MemStorage::new())
    };

    inventory_tracker::serve(&config.server, store).await
}
