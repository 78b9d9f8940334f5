use crate::command::types::{CheckCommand, CommandStatus};
use std::collections::BTreeMap;
use std::process::Command;
use tracing::debug;

/// 同步执行一个检查命令，阻塞直到进程结束
///
/// 子进程继承本进程的 stdout/stderr，不做捕获。
/// 启动失败（程序不存在、权限不足等）映射为
/// `CommandStatus::LaunchFailed`，而不是返回错误。
pub fn run_command(command: &CheckCommand, env: &BTreeMap<String, String>) -> CommandStatus {
    debug!("Running command: {}", command);

    let mut process = Command::new(&command.program);
    process.args(&command.args);
    for (key, value) in env {
        process.env(key, value);
    }

    match process.status() {
        Ok(status) => match status.code() {
            Some(code) => {
                debug!("Command exited with code {}", code);
                CommandStatus::Exited(code)
            }
            // Unix 下被信号终止时没有退出码
            None => {
                debug!("Command terminated without exit code");
                CommandStatus::Terminated
            }
        },
        Err(e) => {
            debug!("Command failed to launch: {}", e);
            CommandStatus::LaunchFailed(e.to_string())
        }
    }
}
