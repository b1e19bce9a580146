//! # Pingora 认证代理服务
//!
//! `ProxyHttp` 实现即决策适配层：`request_filter` 把入站请求的
//! `Authorization` 头送入认证管线，`Deny` 翻译为本地401响应并短路
//! 上游转发，`Allow` 继续走 `upstream_peer` 的静态上游。

use async_trait::async_trait;
use pingora_core::{ErrorType, prelude::*, upstreams::peer::HttpPeer};
use pingora_proxy::{ProxyHttp, Session};
use std::sync::Arc;

use crate::auth::{AuthFilter, PolicyDecision};
use crate::config::AppConfig;
use crate::proxy::context::RequestContext;

/// 认证代理服务
pub struct ProxyService {
    /// 配置
    config: Arc<AppConfig>,
    /// 认证过滤器（跨worker共享）
    filter: Arc<AuthFilter>,
}

impl ProxyService {
    /// 创建新的代理服务实例
    #[must_use]
    pub const fn new(config: Arc<AppConfig>, filter: Arc<AuthFilter>) -> Self {
        Self { config, filter }
    }
}

#[async_trait]
impl ProxyHttp for ProxyService {
    type CTX = RequestContext;

    fn new_ctx(&self) -> Self::CTX {
        RequestContext::new()
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        ctx: &mut Self::CTX,
    ) -> pingora_core::Result<bool> {
        let path = session.req_header().uri.path();
        let method = session.req_header().method.as_str();

        tracing::debug!(
            request_id = %ctx.request_id,
            method = %method,
            path = %path,
            "Processing proxy request"
        );

        // 过滤器只读取 Authorization 头；非UTF-8头值与缺失等价
        let authorization = session
            .req_header()
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        // 求值是同步纯函数：无I/O、无挂起，在回调内一步完成
        let evaluation = self.filter.evaluate(authorization.as_deref());

        ctx.authorization = authorization;
        ctx.outcome = Some(evaluation.outcome);
        ctx.decision = Some(evaluation.decision);

        match evaluation.decision {
            PolicyDecision::Allow => Ok(false),
            PolicyDecision::Deny => {
                tracing::debug!(
                    request_id = %ctx.request_id,
                    outcome = ?evaluation.outcome,
                    "Request denied, sending local 401 response"
                );
                // 本地响应短路后续处理，上游不会被联系
                Err(Error::explain(
                    ErrorType::HTTPStatus(PolicyDecision::DENY_STATUS),
                    "unauthorized",
                ))
            }
        }
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora_core::Result<Box<HttpPeer>> {
        let upstream = &self.config.upstream;
        let sni = upstream
            .sni
            .clone()
            .unwrap_or_else(|| upstream.address.clone());

        let peer = HttpPeer::new(upstream.address.as_str(), upstream.tls, sni);
        Ok(Box::new(peer))
    }

    async fn logging(&self, _session: &mut Session, e: Option<&Error>, ctx: &mut Self::CTX) {
        let duration = ctx.start_time.elapsed();

        if let Some(error) = e {
            tracing::debug!(
                request_id = %ctx.request_id,
                outcome = ?ctx.outcome,
                error = %error,
                duration_ms = duration.as_millis(),
                "Proxy request short-circuited"
            );
        } else {
            tracing::debug!(
                request_id = %ctx.request_id,
                outcome = ?ctx.outcome,
                duration_ms = duration.as_millis(),
                "Proxy request completed"
            );
        }
    }
}
