//! # 配置文件监控模块
//!
//! 实现配置文件的热重载功能

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::{error, info, warn};

use super::AppConfig;

/// 配置变更事件
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    /// 配置重载成功
    Reloaded(Arc<AppConfig>),
    /// 配置重载失败
    ReloadFailed(String),
    /// 配置文件被删除
    FileDeleted,
}

/// 配置监控器
///
/// 重载失败只广播 `ReloadFailed` 并保留当前配置，过滤器继续使用
/// 上一份有效快照；配置错误只有在启动阶段才是致命的。
pub struct ConfigWatcher {
    /// 当前配置
    config: Arc<RwLock<Arc<AppConfig>>>,
    /// 配置文件路径
    config_path: PathBuf,
    /// 事件发送器
    event_sender: broadcast::Sender<ConfigEvent>,
    /// 文件监控器
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// 创建新的配置监控器
    pub fn new(config_path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let config_path = config_path.as_ref().to_path_buf();

        // 加载初始配置
        let initial_config = Arc::new(super::load_config_from_file(&config_path)?);
        let config = Arc::new(RwLock::new(initial_config));

        // 创建事件通道
        let (event_sender, _) = broadcast::channel(64);

        // 创建文件监控器
        let config_clone = Arc::clone(&config);
        let sender_clone = event_sender.clone();
        let path_clone = config_path.clone();

        let mut watcher =
            notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    Self::handle_file_event(&event, &config_clone, &sender_clone, &path_clone);
                }
                Err(e) => {
                    error!("文件监控错误: {}", e);
                }
            })
            .map_err(|e| crate::error::ProxyError::config_with_source("创建文件监控器失败", e))?;

        // 监控配置文件目录
        let config_dir = config_path
            .parent()
            .ok_or_else(|| crate::error::ProxyError::config("无法获取配置文件目录"))?;

        watcher
            .watch(config_dir, RecursiveMode::NonRecursive)
            .map_err(|e| crate::error::ProxyError::config_with_source("启动文件监控失败", e))?;

        info!("配置文件监控器已启动: {:?}", config_path);

        Ok(Self {
            config,
            config_path,
            event_sender,
            _watcher: watcher,
        })
    }

    /// 获取当前配置
    pub async fn get_config(&self) -> Arc<AppConfig> {
        Arc::clone(&*self.config.read().await)
    }

    /// 订阅配置变更事件
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ConfigEvent> {
        self.event_sender.subscribe()
    }

    /// 手动重载配置
    pub async fn reload(&self) -> crate::error::Result<()> {
        match super::load_config_from_file(&self.config_path) {
            Ok(new_config) => {
                let new_config = Arc::new(new_config);
                *self.config.write().await = Arc::clone(&new_config);

                let _ = self.event_sender.send(ConfigEvent::Reloaded(new_config));
                info!("配置重载成功");
                Ok(())
            }
            Err(e) => {
                let error_msg = format!("配置重载失败: {e}");
                let _ = self
                    .event_sender
                    .send(ConfigEvent::ReloadFailed(error_msg.clone()));
                Err(crate::error::ProxyError::config(error_msg))
            }
        }
    }

    /// 处理文件系统事件
    fn handle_file_event(
        event: &Event,
        config: &Arc<RwLock<Arc<AppConfig>>>,
        sender: &broadcast::Sender<ConfigEvent>,
        config_path: &Path,
    ) {
        // 只关注目标配置文件本身的变更
        let touches_config = event.paths.iter().any(|p| p.as_path() == config_path);
        if !touches_config {
            return;
        }

        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) => {
                match super::load_config_from_file(config_path) {
                    Ok(new_config) => {
                        let new_config = Arc::new(new_config);
                        if let Ok(mut guard) = config.try_write() {
                            *guard = Arc::clone(&new_config);
                        }
                        info!("检测到配置文件变更，已重载");
                        let _ = sender.send(ConfigEvent::Reloaded(new_config));
                    }
                    Err(e) => {
                        warn!("配置文件变更但重载失败，沿用当前配置: {}", e);
                        let _ = sender.send(ConfigEvent::ReloadFailed(e.to_string()));
                    }
                }
            }
            EventKind::Remove(_) => {
                warn!("配置文件被删除: {:?}", config_path);
                let _ = sender.send(ConfigEvent::FileDeleted);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(path: &Path, tokens: &str) {
        let mut file = std::fs::File::create(path).unwrap();
        write!(
            file,
            r#"
            [upstream]
            address = "127.0.0.1:8081"

            [auth]
            tokens = [{tokens}]
            "#
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_manual_reload_publishes_new_config() {
        let dir = std::env::temp_dir().join(format!("authn-watch-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        write_config(&path, "\"old-token\"");

        let watcher = ConfigWatcher::new(&path).unwrap();
        let mut events = watcher.subscribe();
        assert_eq!(watcher.get_config().await.auth.tokens, vec!["old-token"]);

        write_config(&path, "\"new-token\"");
        watcher.reload().await.unwrap();

        assert_eq!(watcher.get_config().await.auth.tokens, vec!["new-token"]);
        match events.recv().await.unwrap() {
            ConfigEvent::Reloaded(config) => {
                assert_eq!(config.auth.tokens, vec!["new-token"]);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_invalid_reload_keeps_previous_config() {
        let dir = std::env::temp_dir().join(format!("authn-watch-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        write_config(&path, "\"token\"");

        let watcher = ConfigWatcher::new(&path).unwrap();

        // 凭证集为空的配置无法通过验证
        write_config(&path, "");
        assert!(watcher.reload().await.is_err());
        assert_eq!(watcher.get_config().await.auth.tokens, vec!["token"]);

        std::fs::remove_dir_all(dir).ok();
    }
}
