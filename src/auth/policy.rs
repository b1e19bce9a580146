//! # 策略引擎
//!
//! 将认证结局映射为放行/拒绝动作的固定决策表。默认（permissive）
//! 模式保留非对称策略：显式携带错误凭证的请求被主动拒绝，而未携带
//! 凭证的请求放行，凭证"在场性"的强制交给下游授权层。strict模式
//! 将缺失凭证也一并拒绝。

use serde::{Deserialize, Serialize};

use super::validator::AuthOutcome;

/// 策略模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// 拒绝无效令牌，放行缺失令牌（默认）
    #[default]
    Permissive,
    /// 无效与缺失令牌均拒绝
    Strict,
}

/// 策略决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// 转发至上游
    Allow,
    /// 本地响应401，短路后续处理
    Deny,
}

impl PolicyDecision {
    /// 拒绝时使用的HTTP状态码
    pub const DENY_STATUS: u16 = 401;

    /// 是否放行
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// 固定决策表
///
/// | 结局                | permissive | strict |
/// |---------------------|------------|--------|
/// | Success             | Allow      | Allow  |
/// | FailureInvalidToken | Deny(401)  | Deny   |
/// | FailureMissingToken | Allow      | Deny   |
///
/// 决策是结局与模式的纯函数，不受任何隐藏状态影响。
#[must_use]
pub const fn decide(outcome: AuthOutcome, mode: PolicyMode) -> PolicyDecision {
    match (outcome, mode) {
        (AuthOutcome::Success, _) => PolicyDecision::Allow,
        (AuthOutcome::FailureInvalidToken, _) => PolicyDecision::Deny,
        (AuthOutcome::FailureMissingToken, PolicyMode::Permissive) => PolicyDecision::Allow,
        (AuthOutcome::FailureMissingToken, PolicyMode::Strict) => PolicyDecision::Deny,
    }
}
