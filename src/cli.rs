use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regex::Regex;
use rucheck::config::ConfigLoader;
use rucheck::history;
use rucheck::history::selector::show_interactive;
use rucheck::history::storage::get_storage;
use rucheck::parser;
use rucheck::runner::{CheckReporter, RunSummary, SuiteExecutor, Verdict};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 套件文件路径（等价于 `rucheck run <SUITE>`）
    #[arg(value_name = "SUITE")]
    pub suite: Option<PathBuf>,

    /// 显示每个检查的命令、耗时等细节
    #[arg(short, long)]
    pub verbose: bool,

    /// 额外注入检查子进程的环境变量（可重复）
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 运行套件文件中的所有检查
    Run {
        /// 套件文件（.toml 或 .md）
        path: PathBuf,

        /// 显示每个检查的命令、耗时等细节
        #[arg(short, long)]
        verbose: bool,

        /// 额外注入检查子进程的环境变量（可重复）
        #[arg(long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,
    },

    /// 查看套件运行历史
    History {
        /// 最多显示多少条记录
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// 按套件路径过滤（正则）
        #[arg(long)]
        filter: Option<String>,

        /// 交互式选择一条记录查看细节
        #[arg(short, long)]
        interactive: bool,
    },
}

/// 运行一个套件并返回最终判定
///
/// 套件无法加载属于 harness 错误（退出码 2，由 main 处理），
/// 检查失败不是错误，它体现在返回的判定里。
pub fn run_suite(path: &Path, verbose: bool, env_args: &[String]) -> Result<Verdict> {
    // 解析 --env 覆盖
    let mut cli_vars = Vec::new();
    for raw in env_args {
        let pair = ConfigLoader::parse_cli_var(raw)
            .with_context(|| format!("Invalid --env value '{}': expected KEY=VALUE", raw))?;
        cli_vars.push(pair);
    }

    // 加载可选的 rucheck.toml
    let config = ConfigLoader::find_and_load().unwrap_or_default();
    let env = ConfigLoader::build_env(&config, &cli_vars);

    // 解析套件文件
    let suite = parser::parse_file(path)
        .with_context(|| format!("Failed to load suite {}", path.display()))?;

    // 依次执行所有检查
    let executor = SuiteExecutor::new().with_verbose(verbose).with_env(env);
    let (runner, results) = executor.execute_all(&suite);

    // 累计计数行
    runner.report();

    // verbose 模式追加摘要
    let summary = RunSummary::from_results(&results);
    CheckReporter::new(verbose).print_summary(&summary);

    // 历史记录（best-effort，不影响判定）
    history::record_run(
        suite.source_path.as_deref(),
        &summary,
        RunSummary::failed_names(&results),
    );

    // 最终判定行；进程退出交给 main
    Ok(runner.finish())
}

/// `rucheck history` 入口
pub fn run_history(limit: usize, filter: Option<String>, interactive: bool) -> Result<()> {
    if interactive {
        show_interactive(get_storage())?;
        return Ok(());
    }

    let filter = filter
        .map(|f| Regex::new(&f))
        .transpose()
        .context("Invalid --filter regex")?;

    history::printer::list_history(limit, filter.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_suite_path() {
        let cli = Cli::parse_from(["rucheck", "checks.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.suite, Some(PathBuf::from("checks.toml")));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_run_subcommand() {
        let cli = Cli::parse_from([
            "rucheck", "run", "checks.md", "-v", "--env", "A=1", "--env", "B=2",
        ]);
        match cli.command {
            Some(Commands::Run { path, verbose, env }) => {
                assert_eq!(path, PathBuf::from("checks.md"));
                assert!(verbose);
                assert_eq!(env, vec!["A=1".to_string(), "B=2".to_string()]);
            }
            _ => panic!("Expected run subcommand"),
        }
    }

    #[test]
    fn test_parse_history_subcommand() {
        let cli = Cli::parse_from(["rucheck", "history", "--limit", "5", "--filter", "wit"]);
        match cli.command {
            Some(Commands::History {
                limit,
                filter,
                interactive,
            }) => {
                assert_eq!(limit, 5);
                assert_eq!(filter, Some("wit".to_string()));
                assert!(!interactive);
            }
            _ => panic!("Expected history subcommand"),
        }
    }

    #[test]
    fn test_run_suite_rejects_bad_env() {
        let err = run_suite(Path::new("whatever.toml"), false, &["NOEQ".to_string()])
            .unwrap_err()
            .to_string();
        assert!(err.contains("--env"));
    }
}
