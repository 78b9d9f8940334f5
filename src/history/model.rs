use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 历史记录条目：一次套件运行的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// 唯一 ID (UUID)
    pub id: String,

    /// 运行时间
    pub timestamp: DateTime<Utc>,

    /// 套件文件路径（显示用）
    pub suite: Option<String>,

    /// 通过的检查数
    pub passed: usize,

    /// 失败的检查数
    pub failed: usize,

    /// 跳过的检查数
    pub skipped: usize,

    /// 运行耗时 (毫秒)
    pub duration_ms: u64,

    /// 失败检查的名称，按出现顺序
    pub failed_checks: Vec<String>,
}

impl RunRecord {
    /// 运行的最终判定
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// 判定的显示文本
    pub fn verdict_label(&self) -> &'static str {
        if self.all_passed() { "passed" } else { "failed" }
    }
}
