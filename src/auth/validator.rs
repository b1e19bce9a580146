//! # 令牌校验器
//!
//! 在当前凭证快照中查找已提取的令牌，产出类型化的认证结局。
//! 每个请求恰好产生一个结局，结局是终态的，不会被修正。

use super::credential_store::CredentialStore;

/// 认证结局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOutcome {
    /// 令牌存在且在凭证集中
    Success,
    /// 令牌存在但不在凭证集中
    FailureInvalidToken,
    /// 令牌缺失（含畸形 `Authorization` 头）
    FailureMissingToken,
}

impl AuthOutcome {
    /// 该结局是否计入成功计数器
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// 校验已提取的令牌
///
/// - 无令牌 → `FailureMissingToken`
/// - 令牌在快照中 → `Success`
/// - 令牌不在快照中 → `FailureInvalidToken`
///
/// 纯函数：给定 (令牌, 快照) 结果完全确定。
#[must_use]
pub fn validate(token: Option<&str>, store: &CredentialStore) -> AuthOutcome {
    match token {
        None => AuthOutcome::FailureMissingToken,
        Some(token) if store.contains(token) => AuthOutcome::Success,
        Some(_) => AuthOutcome::FailureInvalidToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::policy::PolicyMode;
    use crate::config::AuthConfig;

    fn store() -> CredentialStore {
        CredentialStore::from_config(&AuthConfig {
            tokens: vec!["correct-credentials".to_string()],
            policy_mode: PolicyMode::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_known_token_succeeds() {
        assert_eq!(
            validate(Some("correct-credentials"), &store()),
            AuthOutcome::Success
        );
    }

    #[test]
    fn test_unknown_token_is_invalid() {
        assert_eq!(
            validate(Some("incorrect-credentials"), &store()),
            AuthOutcome::FailureInvalidToken
        );
    }

    #[test]
    fn test_absent_token_is_missing() {
        assert_eq!(validate(None, &store()), AuthOutcome::FailureMissingToken);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let store = store();
        for _ in 0..3 {
            assert_eq!(
                validate(Some("correct-credentials"), &store),
                AuthOutcome::Success
            );
        }
    }
}
