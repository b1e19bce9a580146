//! # 代理模块
//!
//! 决策适配层：把宿主代理（Pingora）的每请求回调翻译为认证管线
//! 调用，并把管线动作翻译回宿主的继续/本地响应原语。

pub mod context;
pub mod server;
pub mod service;

pub use context::RequestContext;
pub use server::PingoraProxyServer;
pub use service::ProxyService;
