//! # 认证指标计数器
//!
//! 进程级单调计数器，所有worker共享。显式持有并通过 `Arc` 注入，
//! 而不是语言级全局单例，测试可为每个用例注入全新实例。

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::auth::validator::AuthOutcome;

/// 认证结果计数器
///
/// 每个完成求值的请求恰好贡献一次递增：`Success` 只递增成功计数，
/// 两种失败结局只递增失败计数。递增是无锁原子加法，成功与失败
/// 计数器之间无顺序要求。
#[derive(Debug, Default)]
pub struct AuthMetrics {
    success_count: AtomicU64,
    failure_count: AtomicU64,
}

impl AuthMetrics {
    /// 创建全新的计数器实例
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 按认证结局记录一次完成的决策
    pub fn record(&self, outcome: AuthOutcome) {
        if outcome.is_success() {
            self.success_count.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 读取成功计数
    #[must_use]
    pub fn success_count(&self) -> u64 {
        self.success_count.load(Ordering::Relaxed)
    }

    /// 读取失败计数
    #[must_use]
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// 导出只读快照（供管理端抓取接口序列化）
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            authentication_success_count: self.success_count(),
            authentication_failure_count: self.failure_count(),
        }
    }
}

/// 计数器只读快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// 认证成功总数
    pub authentication_success_count: u64,
    /// 认证失败总数（无效令牌 + 缺失令牌）
    pub authentication_failure_count: u64,
}

impl MetricsSnapshot {
    /// 已完成求值的请求总数
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.authentication_success_count + self.authentication_failure_count
    }
}
