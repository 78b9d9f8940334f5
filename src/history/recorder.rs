use crate::history::model::RunRecord;
use crate::history::storage::get_storage;
use crate::runner::RunSummary;
use chrono::Utc;
use std::path::Path;
use tracing::warn;
use uuid::Uuid;

/// 记录一次套件运行
///
/// 这是一个 Best-effort 操作，如果写入失败会打印警告，但不会
/// 影响运行结果或退出码。
pub fn record_run(suite: Option<&Path>, summary: &RunSummary, failed_checks: Vec<String>) {
    let record = RunRecord {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        suite: suite.map(|p| p.display().to_string()),
        passed: summary.passed,
        failed: summary.failed,
        skipped: summary.skipped,
        duration_ms: summary.total_duration.as_millis() as u64,
        failed_checks,
    };

    if let Err(e) = get_storage().append(&record) {
        warn!("Failed to save run history: {}", e);
    }
}
