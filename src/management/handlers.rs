//! # 管理API处理器

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use super::server::AppState;
use crate::metrics::MetricsSnapshot;

/// 读取认证计数器快照
///
/// 计数器单调不减，读取不影响计数。
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics().snapshot())
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "policy_mode": state.policy_mode(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthOutcome, PolicyMode};
    use crate::metrics::AuthMetrics;
    use std::sync::Arc;

    fn state() -> AppState {
        let metrics = Arc::new(AuthMetrics::new());
        metrics.record(AuthOutcome::Success);
        metrics.record(AuthOutcome::FailureInvalidToken);
        AppState::new(metrics, PolicyMode::Permissive)
    }

    #[tokio::test]
    async fn test_metrics_handler_returns_snapshot() {
        let Json(snapshot) = get_metrics(State(state())).await;
        assert_eq!(snapshot.authentication_success_count, 1);
        assert_eq!(snapshot.authentication_failure_count, 1);
    }

    #[tokio::test]
    async fn test_health_handler_reports_mode() {
        let Json(body) = health_check(State(state())).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["policy_mode"], "permissive");
    }
}
