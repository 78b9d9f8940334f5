use std::fmt;

/// 单个检查要执行的外部命令
///
/// 程序名加上有序的参数列表。命令只通过退出状态与运行器交互，
/// 它的 stdout/stderr 不被捕获或解析。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckCommand {
    /// 可执行程序（名称或路径，按系统 PATH 解析）
    pub program: String,

    /// 参数列表，保持原始顺序
    pub args: Vec<String>,
}

impl CheckCommand {
    /// 从程序名和参数构造命令
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// 从字符串列表构造命令，第一个元素为程序名
    ///
    /// 空列表返回 None（没有程序名的命令无法执行）。
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        let mut iter = argv.into_iter();
        let program = iter.next()?;
        Some(Self {
            program,
            args: iter.collect(),
        })
    }

    /// 从一行命令文本构造命令（支持引号和反斜杠转义）
    pub fn from_line(line: &str) -> Result<Option<Self>, SplitError> {
        let argv = split_command_line(line)?;
        Ok(Self::from_argv(argv))
    }
}

impl fmt::Display for CheckCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            // 含空白的参数显示时加引号，便于阅读
            if arg.chars().any(char::is_whitespace) || arg.is_empty() {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// 命令行切分错误
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SplitError {
    /// 引号未闭合
    #[error("unclosed quote in command line")]
    UnclosedQuote,

    /// 行尾悬空的反斜杠
    #[error("trailing backslash in command line")]
    TrailingBackslash,
}

/// 把一行命令文本切分为参数列表
///
/// 规则（够用的最小子集，不是完整 shell 语法）：
/// - 空白分隔参数
/// - 双引号和单引号保护空白
/// - 双引号内反斜杠可转义 `"` 和 `\`；单引号内无转义
pub fn split_command_line(line: &str) -> Result<Vec<String>, SplitError> {
    let mut argv = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    argv.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => return Err(SplitError::UnclosedQuote),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                // 其他转义原样保留反斜杠
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(SplitError::UnclosedQuote),
                        },
                        Some(inner) => current.push(inner),
                        None => return Err(SplitError::UnclosedQuote),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(SplitError::TrailingBackslash),
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }

    if in_word {
        argv.push(current);
    }

    Ok(argv)
}

/// 命令执行状态
///
/// 启动失败被折叠为一种"失败"状态而不是独立的错误通道，
/// 保证单个坏检查不会中断整个套件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    /// 进程正常退出，携带退出码
    Exited(i32),

    /// 进程被信号终止等，没有退出码
    Terminated,

    /// 进程无法启动（如程序不存在）
    LaunchFailed(String),
}

impl CommandStatus {
    /// 退出码 0 视为通过，其余一律视为失败
    pub fn passed(&self) -> bool {
        matches!(self, CommandStatus::Exited(0))
    }

    /// 失败时的诊断文本（仅启动失败有）
    pub fn launch_error(&self) -> Option<&str> {
        match self {
            CommandStatus::LaunchFailed(msg) => Some(msg),
            _ => None,
        }
    }
}
