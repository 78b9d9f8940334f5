use crate::runner::types::{CheckResult, RunSummary};
use colored::Colorize;

/// 检查结果的 stdout 输出
///
/// 默认模式只输出契约行（`PASS - 名称`、`FAIL - 名称`、计数行和
/// 最终判定行）；verbose 模式在契约行下追加缩进的细节行。
pub struct CheckReporter {
    verbose: bool,
}

impl CheckReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// 打印单个检查的契约行，以及 verbose 模式下的细节
    pub fn print_result(&self, result: &CheckResult) {
        if result.skipped {
            println!("{} - {} {}", "SKIP".dimmed(), result.name, "(skipped)".dimmed());
            return;
        }

        if result.passed {
            println!("{} - {}", "PASS".green(), result.name);
        } else {
            println!("{} - {}", "FAIL".red(), result.name);
        }

        // 默认模式下每个检查只输出一行；细节只在 verbose 模式追加
        if self.verbose {
            println!("   {} {}", "command:".dimmed(), result.command);
            println!(
                "   {} {}ms",
                "time:".dimmed(),
                result.duration.as_millis()
            );
            if let Some(error) = &result.launch_error {
                println!("   {}: {}", "Error".red().bold(), error);
            }
        }
    }

    /// 打印套件开始（仅 verbose，默认模式保持契约输出干净）
    pub fn print_header(&self, source: &str, total: usize) {
        if self.verbose {
            println!("\nRunning {} checks from {}...\n", total, source.bold());
        }
    }

    /// 打印累计计数行
    pub fn print_report(&self, pass: usize, fail: usize) {
        println!("PASS: {}", pass.to_string().green());
        println!("FAIL: {}", fail.to_string().red());
    }

    /// 打印最终判定行
    pub fn print_verdict(&self, all_passed: bool) {
        if all_passed {
            println!("{}", "Test passed".green().bold());
        } else {
            println!("{}", "Test failed".red().bold());
        }
    }

    /// 打印运行摘要（仅 verbose）
    pub fn print_summary(&self, summary: &RunSummary) {
        if !self.verbose {
            return;
        }

        println!("\n{}", "━".repeat(50));
        println!("{}", "Summary".bold());
        println!("{}", "━".repeat(50));

        if summary.skipped > 0 {
            println!(
                "  {}: {} passed, {} failed, {} skipped, {} total",
                "Checks".bold(),
                summary.passed.to_string().green(),
                summary.failed.to_string().red(),
                summary.skipped.to_string().dimmed(),
                summary.total
            );
        } else if summary.failed == 0 {
            println!(
                "  {}: {} passed, {} total",
                "Checks".bold(),
                summary.passed.to_string().green(),
                summary.total
            );
        } else {
            println!(
                "  {}: {} passed, {} failed, {} total",
                "Checks".bold(),
                summary.passed.to_string().green(),
                summary.failed.to_string().red(),
                summary.total
            );
        }

        println!(
            "  {}: {:.3}s",
            "Duration".bold(),
            summary.total_duration.as_secs_f64()
        );
        println!();
    }
}

impl Default for CheckReporter {
    fn default() -> Self {
        Self::new(false)
    }
}
