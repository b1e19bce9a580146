//! # 代理上下文模块
//!
//! 请求头到达时创建、决策交付后丢弃的临时请求上下文。
//! 不跨请求保留任何状态。

use std::time::Instant;

use uuid::Uuid;

use crate::auth::{AuthOutcome, PolicyDecision};

/// 请求上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// 请求ID
    pub request_id: String,
    /// 开始时间
    pub start_time: Instant,
    /// 原始 `Authorization` 头值（如存在）
    pub authorization: Option<String>,
    /// 认证结局（求值完成后填充）
    pub outcome: Option<AuthOutcome>,
    /// 策略决策（求值完成后填充）
    pub decision: Option<PolicyDecision>,
}

impl RequestContext {
    /// 创建新的请求上下文
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            start_time: Instant::now(),
            authorization: None,
            outcome: None,
            decision: None,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
