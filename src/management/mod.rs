//! # 管理API模块
//!
//! Axum HTTP服务器，在独立端口上提供只读的计数器快照与健康检查。
//! 指标的抓取/导出传输本身在系统边界之外，这里只是只读暴露面。

pub mod handlers;
pub mod server;

pub use server::{ManagementConfig, ManagementServer};
