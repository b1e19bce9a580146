//! # 配置管理模块
//!
//! 处理应用配置加载、验证和热重载

mod app_config;
mod watcher;

pub use app_config::{AppConfig, AuthConfig, ListenConfig, ServerConfig, UpstreamConfig};
pub use watcher::{ConfigEvent, ConfigWatcher};

use std::env;
use std::path::Path;

/// 解析配置文件路径
///
/// 优先使用 `API_PROXY_CONFIG_PATH` 环境变量，否则根据 `RUST_ENV`
/// 推导 `config/config.{env}.toml`。
#[must_use]
pub fn resolve_config_path() -> String {
    if let Ok(path) = env::var("API_PROXY_CONFIG_PATH") {
        path
    } else {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        format!("config/config.{env}.toml")
    }
}

/// 加载配置文件
pub fn load_config() -> crate::error::Result<AppConfig> {
    load_config_from_file(resolve_config_path())
}

/// 从指定路径加载并验证配置
pub fn load_config_from_file(path: impl AsRef<Path>) -> crate::error::Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(crate::error::ProxyError::config(format!(
            "配置文件不存在: {}",
            path.display()
        )));
    }

    let config_content = std::fs::read_to_string(path).map_err(|e| {
        crate::error::ProxyError::config_with_source(
            format!("读取配置文件失败: {}", path.display()),
            e,
        )
    })?;

    let config: AppConfig = toml::from_str(&config_content)?;

    // 验证配置的有效性
    config
        .validate()
        .map_err(crate::error::ProxyError::config)?;

    Ok(config)
}
