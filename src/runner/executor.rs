use crate::parser::ParsedSuite;
use crate::runner::check_runner::CheckRunner;
use crate::runner::reporter::CheckReporter;
use crate::runner::types::CheckResult;
use std::collections::BTreeMap;
use tracing::warn;

/// 套件执行器：按文档顺序驱动一个 CheckRunner 跑完整个套件
///
/// 顺序、单线程执行；每个检查阻塞到其子进程结束。跳过的检查
/// 不进入运行器，因此不影响计数不变量。
pub struct SuiteExecutor {
    verbose: bool,
    env: BTreeMap<String, String>,
}

impl SuiteExecutor {
    pub fn new() -> Self {
        Self {
            verbose: false,
            env: BTreeMap::new(),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 设置注入每个检查子进程的环境变量
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// 执行套件中的所有检查
    ///
    /// 返回运行器（计数状态）和收集到的结果。失败的检查不会
    /// 中断后续检查；这里没有错误可传播。
    pub fn execute_all(&self, suite: &ParsedSuite) -> (CheckRunner, Vec<CheckResult>) {
        let reporter = CheckReporter::new(self.verbose);
        if let Some(path) = &suite.source_path {
            reporter.print_header(&path.display().to_string(), suite.checks.len());
        }

        if suite.checks.is_empty() {
            warn!("Suite has no checks");
        }

        let mut runner =
            CheckRunner::new(CheckReporter::new(self.verbose)).with_env(self.env.clone());
        let mut results = Vec::with_capacity(suite.checks.len());

        for (index, check) in suite.checks.iter().enumerate() {
            let check_number = index + 1;

            if check.skip {
                let result = CheckResult::skipped(
                    check_number,
                    check.name.clone(),
                    check.command.to_string(),
                );
                reporter.print_result(&result);
                results.push(result);
                continue;
            }

            let mut result = runner.check(&check.name, &check.command);
            // 运行器按已执行数编号；这里改为套件内序号，跳过的也占位
            result.check_number = check_number;
            results.push(result);
        }

        (runner, results)
    }
}

impl Default for SuiteExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CheckCommand;
    use crate::parser::ParsedCheck;

    fn sh_check(name: &str, script: &str) -> ParsedCheck {
        ParsedCheck::new(
            name,
            CheckCommand::new("sh", vec!["-c".to_string(), script.to_string()]),
        )
    }

    #[test]
    fn test_execute_all_counts_and_order() {
        let mut suite = ParsedSuite::new();
        suite.add_check(sh_check("good", "exit 0"));
        suite.add_check(sh_check("bad", "exit 1"));

        let (runner, results) = SuiteExecutor::new().execute_all(&suite);

        assert_eq!(runner.pass_count(), 1);
        assert_eq!(runner.fail_count(), 1);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "good");
        assert!(results[0].passed);
        assert_eq!(results[1].name, "bad");
        assert!(!results[1].passed);
    }

    #[test]
    fn test_skipped_checks_do_not_touch_counters() {
        let mut suite = ParsedSuite::new();
        suite.add_check(sh_check("run me", "exit 0"));
        let mut skipped = sh_check("not me", "exit 1");
        skipped.skip = true;
        suite.add_check(skipped);

        let (runner, results) = SuiteExecutor::new().execute_all(&suite);

        assert_eq!(runner.checks_run(), 1);
        assert!(runner.all_passed());
        assert_eq!(results.len(), 2);
        assert!(results[1].skipped);
        assert_eq!(results[1].check_number, 2);
    }

    #[test]
    fn test_failure_does_not_abort_suite() {
        let mut suite = ParsedSuite::new();
        suite.add_check(ParsedCheck::new(
            "broken launch",
            CheckCommand::new("rucheck-missing-binary", Vec::new()),
        ));
        suite.add_check(sh_check("still runs", "exit 0"));

        let (runner, results) = SuiteExecutor::new().execute_all(&suite);

        assert_eq!(runner.pass_count(), 1);
        assert_eq!(runner.fail_count(), 1);
        assert!(results[0].launch_error.is_some());
        assert!(results[1].passed);
    }

    #[test]
    fn test_empty_suite_runs_nothing() {
        let (runner, results) = SuiteExecutor::new().execute_all(&ParsedSuite::new());
        assert_eq!(runner.checks_run(), 0);
        assert!(results.is_empty());
        assert!(runner.all_passed());
    }

    #[test]
    fn test_env_propagates_to_checks() {
        let mut env = BTreeMap::new();
        env.insert("RUCHECK_EXECUTOR_FLAG".to_string(), "yes".to_string());

        let mut suite = ParsedSuite::new();
        suite.add_check(sh_check(
            "sees env",
            r#"test "$RUCHECK_EXECUTOR_FLAG" = yes"#,
        ));

        let (runner, _) = SuiteExecutor::new().with_env(env).execute_all(&suite);
        assert!(runner.all_passed());
    }
}
