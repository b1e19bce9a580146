//! # 应用配置结构定义

use serde::{Deserialize, Serialize};

use crate::auth::policy::PolicyMode;

/// 应用主配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 双端口服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 上游服务配置
    pub upstream: UpstreamConfig,
    /// 认证配置
    pub auth: AuthConfig,
}

/// 监听地址配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    /// 监听主机
    pub host: String,
    /// 监听端口
    pub port: u16,
}

/// 双端口服务器配置（代理端口 + 管理端口）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 代理服务监听配置
    pub proxy: ListenConfig,
    /// 管理服务监听配置
    pub management: ListenConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            proxy: ListenConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            management: ListenConfig {
                host: "127.0.0.1".to_string(),
                port: 9090,
            },
        }
    }
}

/// 上游服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 上游地址（host:port）
    pub address: String,
    /// 是否使用TLS连接上游
    #[serde(default)]
    pub tls: bool,
    /// TLS SNI（默认使用上游主机名）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
}

/// 认证配置
///
/// `tokens` 是过滤器接受的全部Bearer令牌值；为空视为致命的启动配置
/// 错误，而不是逐请求失败。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 接受的令牌集合
    pub tokens: Vec<String>,
    /// 策略模式（permissive: 拒绝无效令牌、放行缺失令牌；strict: 两者均拒绝）
    #[serde(default)]
    pub policy_mode: PolicyMode,
}

impl AppConfig {
    /// 获取代理端口
    #[must_use]
    pub fn get_proxy_port(&self) -> u16 {
        self.server.proxy.port
    }

    /// 获取管理端口
    #[must_use]
    pub fn get_management_port(&self) -> u16 {
        self.server.management.port
    }

    /// 获取代理监听地址
    #[must_use]
    pub fn proxy_listen_address(&self) -> String {
        format!("{}:{}", self.server.proxy.host, self.server.proxy.port)
    }

    /// 获取管理监听地址
    #[must_use]
    pub fn management_listen_address(&self) -> String {
        format!(
            "{}:{}",
            self.server.management.host, self.server.management.port
        )
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), String> {
        if self.server.proxy.port == 0 {
            return Err(format!("无效的代理端口: {}", self.server.proxy.port));
        }
        if self.server.management.port == 0 {
            return Err(format!("无效的管理端口: {}", self.server.management.port));
        }
        if self.server.proxy.port == self.server.management.port {
            return Err("代理端口与管理端口不能相同".to_string());
        }

        if self.upstream.address.is_empty() {
            return Err("上游地址不能为空".to_string());
        }

        // 凭证集缺失或为空是致命配置错误：过滤器不得在未定义状态下激活
        if self.auth.tokens.is_empty() {
            return Err("认证令牌集合不能为空".to_string());
        }
        if self.auth.tokens.iter().any(|t| t.trim().is_empty()) {
            return Err("认证令牌不能为空白字符串".to_string());
        }

        Ok(())
    }
}
