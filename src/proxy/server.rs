//! # Pingora 代理服务器
//!
//! 基于 Pingora 实现的代理数据面启动封装

use pingora_core::server::{Server, configuration::Opt};
use pingora_proxy::http_proxy_service;
use std::sync::Arc;
use tracing::info;

use crate::auth::AuthFilter;
use crate::config::AppConfig;
use crate::error::{ProxyError, Result};
use crate::proxy::service::ProxyService;

/// Pingora 代理服务器
pub struct PingoraProxyServer {
    config: Arc<AppConfig>,
    filter: Arc<AuthFilter>,
}

impl PingoraProxyServer {
    /// 创建新的代理服务器
    #[must_use]
    pub const fn new(config: Arc<AppConfig>, filter: Arc<AuthFilter>) -> Self {
        Self { config, filter }
    }

    /// 创建Pingora服务器选项（基本配置）
    fn create_pingora_options() -> Opt {
        Opt {
            daemon: false,   // 在前台运行
            upgrade: false,  // 不支持在线升级
            nocapture: true, // 不捕获标准输出/错误
            ..Opt::default()
        }
    }

    /// 获取代理服务器监听地址
    #[must_use]
    pub fn get_server_address(&self) -> String {
        self.config.proxy_listen_address()
    }

    /// 启动服务器
    ///
    /// 认证过滤器在此之前已经构建完成；凭证配置错误在构建阶段
    /// 就会让启动失败，监听永远不会在未定义状态下激活。
    pub async fn start(self) -> Result<()> {
        let opt = Self::create_pingora_options();
        let mut server = Server::new(Some(opt)).map_err(|err| {
            ProxyError::server_init(format!("Failed to create Pingora server: {err}"))
        })?;

        server.bootstrap();

        let proxy_service = ProxyService::new(Arc::clone(&self.config), Arc::clone(&self.filter));
        let mut http_service = http_proxy_service(&server.configuration, proxy_service);

        let server_address = self.get_server_address();
        http_service.add_tcp(&server_address);

        server.add_service(http_service);

        info!(address = %server_address, "Pingora代理服务器启动");

        let handle = tokio::task::spawn_blocking(move || {
            server.run_forever();
        });

        match handle.await {
            Ok(()) => Ok(()),
            Err(err) => Err(ProxyError::server_start(format!(
                "Pingora server task failed: {err}"
            ))),
        }
    }
}
