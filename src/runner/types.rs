use std::process::ExitCode;
use std::time::Duration;

/// 整个套件的最终判定
///
/// 只要有一个检查失败即为 Failed。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    /// 判定对应的进程退出码：通过 0，失败 1
    pub fn exit_code(self) -> ExitCode {
        match self {
            Verdict::Passed => ExitCode::SUCCESS,
            Verdict::Failed => ExitCode::FAILURE,
        }
    }
}

/// 单个检查的执行结果
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// 检查在套件中的序号（从 1 开始）
    pub check_number: usize,

    /// 检查名称
    pub name: String,

    /// 执行的命令（展示用文本）
    pub command: String,

    /// 是否通过（退出码 0）
    pub passed: bool,

    /// 执行耗时
    pub duration: Duration,

    /// 启动失败时的诊断文本
    pub launch_error: Option<String>,

    /// 是否被跳过
    pub skipped: bool,
}

impl CheckResult {
    pub fn finished(
        check_number: usize,
        name: String,
        command: String,
        passed: bool,
        duration: Duration,
        launch_error: Option<String>,
    ) -> Self {
        Self {
            check_number,
            name,
            command,
            passed,
            duration,
            launch_error,
            skipped: false,
        }
    }

    pub fn skipped(check_number: usize, name: String, command: String) -> Self {
        Self {
            check_number,
            name,
            command,
            // 跳过的检查不参与通过/失败计数
            passed: false,
            duration: Duration::from_secs(0),
            launch_error: None,
            skipped: true,
        }
    }
}

/// 套件运行摘要
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_duration: Duration,
}

impl RunSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed && !r.skipped).count();
        let skipped = results.iter().filter(|r| r.skipped).count();
        let total_duration = results.iter().map(|r| r.duration).sum();

        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed - skipped,
            skipped,
            total_duration,
        }
    }

    /// 失败检查的名称，按出现顺序
    pub fn failed_names(results: &[CheckResult]) -> Vec<String> {
        results
            .iter()
            .filter(|r| !r.passed && !r.skipped)
            .map(|r| r.name.clone())
            .collect()
    }
}
