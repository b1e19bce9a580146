//! # 认证模块
//!
//! 请求路径上的Bearer令牌认证管线：提取 → 校验 → 策略决策。
//! 管线本身是同步纯函数，不做任何I/O，可在无代理宿主的情况下测试。

pub mod credential_store;
pub mod filter;
pub mod policy;
pub mod token_extractor;
pub mod validator;

pub use credential_store::{CredentialStore, StoreHandle};
pub use filter::{AuthFilter, Evaluation};
pub use policy::{PolicyDecision, PolicyMode};
pub use token_extractor::extract_bearer_token;
pub use validator::AuthOutcome;
