//! # Token Authn Proxy 主程序
//!
//! 基于 Pingora 的 Bearer Token 认证代理

use token_authn_proxy::{Result, dual_port_setup, logging};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    logging::init_logging(None);

    info!("服务启动");

    if let Err(e) = dual_port_setup::run_dual_port_servers().await {
        // 启动阶段的配置错误（如空凭证集）在此终止进程：
        // 过滤器链拒绝激活，而不是逐请求静默放行或拒绝
        error!("服务启动失败: {e:?}");
        std::process::exit(1);
    }

    info!("服务正常关闭");
    Ok(())
}
