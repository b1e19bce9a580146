//! # 认证过滤器核心
//!
//! 把提取、校验、策略决策与计数器更新组合为一次同步求值。
//! 决策适配层（代理回调）只负责把宿主请求头送进来、把动作翻译
//! 回去；这里不依赖任何代理宿主，可独立测试。

use std::sync::Arc;

use tracing::debug;

use super::credential_store::{CredentialStore, StoreHandle};
use super::policy::{self, PolicyDecision, PolicyMode};
use super::token_extractor::extract_bearer_token;
use super::validator::{self, AuthOutcome};
use crate::config::AuthConfig;
use crate::error::Result;
use crate::metrics::AuthMetrics;

/// 一次完成的求值结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// 认证结局
    pub outcome: AuthOutcome,
    /// 策略决策
    pub decision: PolicyDecision,
}

/// 认证过滤器
///
/// 每个代理worker持有同一个 `Arc<AuthFilter>`；凭证快照经
/// `StoreHandle` 原子交换，计数器是唯一跨worker共享的可变状态。
#[derive(Debug)]
pub struct AuthFilter {
    store: StoreHandle,
    mode: PolicyMode,
    metrics: Arc<AuthMetrics>,
}

impl AuthFilter {
    /// 从认证配置构建过滤器
    ///
    /// 凭证集缺失或为空时返回配置错误，调用方必须让启动失败。
    pub fn from_config(config: &AuthConfig, metrics: Arc<AuthMetrics>) -> Result<Self> {
        let store = CredentialStore::from_config(config)?;
        Ok(Self {
            store: StoreHandle::new(store),
            mode: config.policy_mode,
            metrics,
        })
    }

    /// 对一次请求的 `Authorization` 头值求值
    ///
    /// 单遍状态机：提取 → 校验 → 决策 → 计数，无循环、无重试、
    /// 无挂起。每次调用恰好递增一个计数器一次。
    pub fn evaluate(&self, authorization: Option<&str>) -> Evaluation {
        // 整个求值过程只使用这一份快照
        let snapshot = self.store.snapshot();

        let token = extract_bearer_token(authorization);
        let outcome = validator::validate(token, &snapshot);
        let decision = policy::decide(outcome, self.mode);

        self.metrics.record(outcome);

        debug!(?outcome, ?decision, "authentication decision");

        Evaluation { outcome, decision }
    }

    /// 用新的认证配置重载凭证快照
    ///
    /// 配置无效时返回错误且当前快照保持不变。策略模式在启动时
    /// 固定，不参与热重载。
    pub fn reload(&self, config: &AuthConfig) -> Result<()> {
        let store = CredentialStore::from_config(config)?;
        self.store.publish(store);
        Ok(())
    }

    /// 当前策略模式
    #[must_use]
    pub const fn policy_mode(&self) -> PolicyMode {
        self.mode
    }

    /// 计数器句柄
    #[must_use]
    pub fn metrics(&self) -> &Arc<AuthMetrics> {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(mode: PolicyMode) -> AuthFilter {
        AuthFilter::from_config(
            &AuthConfig {
                tokens: vec!["correct-credentials".to_string()],
                policy_mode: mode,
            },
            Arc::new(AuthMetrics::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_allows_and_counts_success() {
        let filter = filter(PolicyMode::Permissive);
        let eval = filter.evaluate(Some("Bearer correct-credentials"));

        assert_eq!(eval.outcome, AuthOutcome::Success);
        assert_eq!(eval.decision, PolicyDecision::Allow);
        assert_eq!(filter.metrics().success_count(), 1);
        assert_eq!(filter.metrics().failure_count(), 0);
    }

    #[test]
    fn test_invalid_token_denies_and_counts_failure() {
        let filter = filter(PolicyMode::Permissive);
        let eval = filter.evaluate(Some("Bearer incorrect-credentials"));

        assert_eq!(eval.outcome, AuthOutcome::FailureInvalidToken);
        assert_eq!(eval.decision, PolicyDecision::Deny);
        assert_eq!(filter.metrics().success_count(), 0);
        assert_eq!(filter.metrics().failure_count(), 1);
    }

    #[test]
    fn test_missing_token_allows_but_counts_failure() {
        let filter = filter(PolicyMode::Permissive);
        let eval = filter.evaluate(None);

        assert_eq!(eval.outcome, AuthOutcome::FailureMissingToken);
        assert_eq!(eval.decision, PolicyDecision::Allow);
        assert_eq!(filter.metrics().failure_count(), 1);
    }

    #[test]
    fn test_strict_mode_denies_missing_token() {
        let filter = filter(PolicyMode::Strict);
        let eval = filter.evaluate(None);

        assert_eq!(eval.outcome, AuthOutcome::FailureMissingToken);
        assert_eq!(eval.decision, PolicyDecision::Deny);
    }

    #[test]
    fn test_malformed_header_equals_missing() {
        let filter = filter(PolicyMode::Permissive);
        let eval = filter.evaluate(Some("Basic Zm9v"));

        assert_eq!(eval.outcome, AuthOutcome::FailureMissingToken);
        assert_eq!(eval.decision, PolicyDecision::Allow);
    }

    #[test]
    fn test_empty_token_set_fails_construction() {
        let result = AuthFilter::from_config(
            &AuthConfig {
                tokens: vec![],
                policy_mode: PolicyMode::Permissive,
            },
            Arc::new(AuthMetrics::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reload_swaps_credentials() {
        let filter = filter(PolicyMode::Permissive);

        filter
            .reload(&AuthConfig {
                tokens: vec!["rotated-credentials".to_string()],
                policy_mode: PolicyMode::Permissive,
            })
            .unwrap();

        assert_eq!(
            filter.evaluate(Some("Bearer correct-credentials")).outcome,
            AuthOutcome::FailureInvalidToken
        );
        assert_eq!(
            filter.evaluate(Some("Bearer rotated-credentials")).outcome,
            AuthOutcome::Success
        );
    }

    #[test]
    fn test_invalid_reload_keeps_snapshot() {
        let filter = filter(PolicyMode::Permissive);

        let result = filter.reload(&AuthConfig {
            tokens: vec![],
            policy_mode: PolicyMode::Permissive,
        });

        assert!(result.is_err());
        assert_eq!(
            filter.evaluate(Some("Bearer correct-credentials")).outcome,
            AuthOutcome::Success
        );
    }
}
