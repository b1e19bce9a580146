//! # 管理服务器
//!
//! Axum HTTP服务器，提供管理和监控API

use axum::Router;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::PolicyMode;
use crate::error::{ProxyError, Result};
use crate::metrics::AuthMetrics;

/// 管理服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementConfig {
    /// 监听地址
    pub bind_address: String,
    /// 监听端口
    pub port: u16,
    /// 是否启用CORS
    pub enable_cors: bool,
    /// API前缀
    pub api_prefix: String,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 9090,
            enable_cors: true,
            api_prefix: "/api".to_string(),
        }
    }
}

/// 管理服务器应用状态
#[derive(Clone)]
pub struct AppState {
    metrics: Arc<AuthMetrics>,
    policy_mode: PolicyMode,
}

impl AppState {
    #[must_use]
    pub const fn new(metrics: Arc<AuthMetrics>, policy_mode: PolicyMode) -> Self {
        Self {
            metrics,
            policy_mode,
        }
    }

    #[must_use]
    pub fn metrics(&self) -> &AuthMetrics {
        &self.metrics
    }

    #[must_use]
    pub const fn policy_mode(&self) -> PolicyMode {
        self.policy_mode
    }
}

/// 管理服务器
pub struct ManagementServer {
    /// 配置
    config: ManagementConfig,
    /// 路由器
    router: Router,
}

impl ManagementServer {
    /// 创建新的管理服务器
    pub fn new(config: ManagementConfig, state: AppState) -> Result<Self> {
        let router = Self::create_router(state, &config);
        Ok(Self { config, router })
    }

    /// 创建路由器
    fn create_router(state: AppState, config: &ManagementConfig) -> Router {
        let api_routes = Router::new()
            .route("/metrics", get(super::handlers::get_metrics))
            .route("/health", get(super::handlers::health_check))
            .with_state(state);

        let mut router = Router::new()
            .nest(&config.api_prefix, api_routes)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        if config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        router
    }

    /// 启动管理服务器
    pub async fn start(self) -> Result<()> {
        let bind_address = format!("{}:{}", self.config.bind_address, self.config.port);

        let listener = TcpListener::bind(&bind_address).await.map_err(|e| {
            ProxyError::server_init(format!("管理服务器绑定失败 {bind_address}: {e}"))
        })?;

        info!(address = %bind_address, "管理服务器启动");

        axum::serve(listener, self.router)
            .await
            .map_err(|e| ProxyError::server_start(format!("管理服务器运行失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManagementConfig::default();
        assert_eq!(config.port, 9090);
        assert_eq!(config.api_prefix, "/api");
        assert!(config.enable_cors);
    }
}
