//! # 双端口服务启动
//!
//! 从验证过的配置构建代理服务器（数据面）与管理服务器（只读指标），
//! 并接上配置热重载任务。凭证配置错误在任何监听激活之前就让启动
//! 失败，过滤器链不会在未定义状态下上线。

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::auth::AuthFilter;
use crate::config::{AppConfig, ConfigEvent, ConfigWatcher};
use crate::error::Result;
use crate::management::{ManagementConfig, ManagementServer};
use crate::management::server::AppState;
use crate::metrics::AuthMetrics;
use crate::proxy::PingoraProxyServer;

/// 创建服务器实例
///
/// 从配置构建管理服务器和代理服务器实例
fn create_servers(
    config: &Arc<AppConfig>,
    filter: &Arc<AuthFilter>,
    metrics: &Arc<AuthMetrics>,
) -> Result<(ManagementServer, PingoraProxyServer)> {
    let management_config = ManagementConfig {
        bind_address: config.server.management.host.clone(),
        port: config.server.management.port,
        ..Default::default()
    };

    info!(
        address = %config.management_listen_address(),
        "Management server will listen"
    );
    info!(
        address = %config.proxy_listen_address(),
        "Proxy server will listen"
    );

    let management_state = AppState::new(Arc::clone(metrics), filter.policy_mode());
    let management_server = ManagementServer::new(management_config, management_state)?;
    let proxy_server = PingoraProxyServer::new(Arc::clone(config), Arc::clone(filter));

    Ok((management_server, proxy_server))
}

/// 订阅配置变更并热重载凭证快照
///
/// 重载失败只记录日志，上一份快照保持生效；请求路径不受影响。
fn spawn_credential_reload_task(watcher: &ConfigWatcher, filter: Arc<AuthFilter>) {
    let mut events = watcher.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ConfigEvent::Reloaded(new_config) => match filter.reload(&new_config.auth) {
                    Ok(()) => {
                        info!(
                            tokens = new_config.auth.tokens.len(),
                            "凭证快照已原子切换"
                        );
                    }
                    Err(e) => warn!("凭证重载被拒绝，沿用当前快照: {}", e),
                },
                ConfigEvent::ReloadFailed(e) => warn!("配置重载失败: {}", e),
                ConfigEvent::FileDeleted => warn!("配置文件被删除，沿用当前配置"),
            }
        }
    });
}

/// 启动双端口服务并运行至收到关闭信号
pub async fn run_dual_port_servers() -> Result<()> {
    // 启动阶段的配置错误是致命的（含空凭证集）
    let watcher = ConfigWatcher::new(crate::config::resolve_config_path())?;
    let config = watcher.get_config().await;

    let metrics = Arc::new(AuthMetrics::new());
    let filter = Arc::new(AuthFilter::from_config(&config.auth, Arc::clone(&metrics))?);

    spawn_credential_reload_task(&watcher, Arc::clone(&filter));

    let (management_server, proxy_server) = create_servers(&config, &filter, &metrics)?;

    tokio::select! {
        result = management_server.start() => {
            error!("管理服务器退出");
            result
        }
        result = proxy_server.start() => {
            error!("代理服务器退出");
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("收到 Ctrl+C 信号，开始关闭");
            Ok(())
        }
    }
}
