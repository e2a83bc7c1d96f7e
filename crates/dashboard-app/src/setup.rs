use std::sync::Arc;

use anyhow::Result;
use dashboard_core::config::AppConfig;
use dashboard_store::{open_store, KeyValueStore, StorageMode};

pub async fn create_store(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    let mode = match config.storage.mode.as_str() {
        "memory" => StorageMode::Memory,
        _ => StorageMode::Persistent(config.storage.path.clone()),
    };
    Ok(open_store(mode).await?)
}
