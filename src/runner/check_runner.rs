use crate::command::{CheckCommand, run_command};
use crate::runner::reporter::CheckReporter;
use crate::runner::types::{CheckResult, Verdict};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

/// 检查运行器：持有通过/失败计数并执行单个检查
///
/// 每次运行只实例化一个。不变量：`pass + fail` 恒等于
/// `check` 的调用次数；跳过的检查不经过 `check`，不影响计数。
pub struct CheckRunner {
    pass: usize,
    fail: usize,
    env: BTreeMap<String, String>,
    reporter: CheckReporter,
}

impl CheckRunner {
    pub fn new(reporter: CheckReporter) -> Self {
        Self {
            pass: 0,
            fail: 0,
            env: BTreeMap::new(),
            reporter,
        }
    }

    /// 设置注入每个检查子进程的环境变量
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// 执行一个命名检查
    ///
    /// 同步执行命令并等待结束。退出码 0 记为通过，其余（包括
    /// 启动失败）记为失败。打印一行 `PASS - 名称` 或
    /// `FAIL - 名称` 并更新对应计数。失败是正常结果而不是错误，
    /// 因此本方法不返回 Result，坏检查不会中断套件。
    pub fn check(&mut self, name: &str, command: &CheckCommand) -> CheckResult {
        let start = Instant::now();
        let status = run_command(command, &self.env);
        let duration = start.elapsed();

        let passed = status.passed();
        if passed {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
        debug!(
            "Check '{}' {} (pass={}, fail={})",
            name,
            if passed { "passed" } else { "failed" },
            self.pass,
            self.fail
        );

        let result = CheckResult::finished(
            self.checks_run(),
            name.to_string(),
            command.to_string(),
            passed,
            duration,
            status.launch_error().map(|e| e.to_string()),
        );
        self.reporter.print_result(&result);
        result
    }

    /// 打印累计计数（`PASS: n` / `FAIL: n`）
    ///
    /// 幂等，可在检查之间调用作为进度输出。
    pub fn report(&self) {
        self.reporter.print_report(self.pass, self.fail);
    }

    /// 打印最终判定并返回它
    ///
    /// 没有失败时输出 `Test passed`（判定 Passed，退出码 0），
    /// 否则输出 `Test failed`（判定 Failed，退出码 1）。这里只
    /// 返回判定，真正的进程退出由 main 的返回值完成，保证唯一
    /// 可审计的退出点。
    pub fn finish(&self) -> Verdict {
        self.reporter.print_verdict(self.all_passed());
        if self.all_passed() {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    }

    pub fn pass_count(&self) -> usize {
        self.pass
    }

    pub fn fail_count(&self) -> usize {
        self.fail
    }

    /// 已执行的检查数
    pub fn checks_run(&self) -> usize {
        self.pass + self.fail
    }

    pub fn all_passed(&self) -> bool {
        self.fail == 0
    }
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new(CheckReporter::default())
    }
}
