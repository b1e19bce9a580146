//! # 凭证存储
//!
//! 保存过滤器接受的全部令牌值。单个快照一经构建即不可变；配置重载
//! 构建新实例后通过原子指针交换发布，请求在整个求值过程中只观察
//! 同一份快照，读取路径无锁。

use std::collections::HashSet;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::AuthConfig;
use crate::error::{ProxyError, Result};

/// 不可变的凭证集合快照
///
/// 成员测试逐字节精确匹配，平均 O(1)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    tokens: HashSet<String>,
}

impl CredentialStore {
    /// 从认证配置构建凭证存储
    ///
    /// 凭证集缺失或为空是致命配置错误：过滤器链必须拒绝激活，
    /// 而不是在未定义状态下逐请求放行或拒绝。
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        if config.tokens.is_empty() {
            return Err(ProxyError::config("认证令牌集合不能为空"));
        }
        if config.tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(ProxyError::config("认证令牌不能为空白字符串"));
        }

        Ok(Self {
            tokens: config.tokens.iter().cloned().collect(),
        })
    }

    /// 检查令牌是否在接受集合中（精确匹配，不做大小写折叠）
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// 当前快照中的令牌数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// 快照是否为空（构建路径保证不会出现）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// 凭证存储句柄
///
/// 所有worker共享同一个句柄；重载方通过 `publish` 做一次原子指针
/// 交换，请求方通过 `snapshot` 取得一份 `Arc` 后在整个求值过程中
/// 只使用该快照。
#[derive(Debug)]
pub struct StoreHandle {
    current: ArcSwap<CredentialStore>,
}

impl StoreHandle {
    /// 以初始快照创建句柄
    #[must_use]
    pub fn new(store: CredentialStore) -> Self {
        Self {
            current: ArcSwap::from_pointee(store),
        }
    }

    /// 获取当前快照（无锁）
    #[must_use]
    pub fn snapshot(&self) -> Arc<CredentialStore> {
        self.current.load_full()
    }

    /// 原子地发布新快照
    pub fn publish(&self, store: CredentialStore) {
        self.current.store(Arc::new(store));
    }
}
