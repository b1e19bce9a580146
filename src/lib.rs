//! # Token Authn Proxy Library
//!
//! 请求路径上的Bearer令牌认证代理核心库

pub mod auth;
pub mod config;
pub mod dual_port_setup;
pub mod error;
pub mod logging;
pub mod management;
pub mod metrics;
pub mod proxy;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ProxyError, Result};
