mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    // 初始化日志系统
    rucheck::logger::init_logger();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Some(Commands::Run { path, verbose, env }) => {
            cli::run_suite(&path, verbose, &env).map(|verdict| verdict.exit_code())
        }
        Some(Commands::History {
            limit,
            filter,
            interactive,
        }) => cli::run_history(limit, filter, interactive).map(|_| ExitCode::SUCCESS),
        None => match cli.suite {
            Some(path) => cli::run_suite(&path, cli.verbose, &cli.env).map(|v| v.exit_code()),
            None => {
                eprintln!("No suite file provided, see --help");
                return ExitCode::from(2);
            }
        },
    };

    // 唯一的进程退出点：判定映射为 0/1，harness 错误为 2
    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
