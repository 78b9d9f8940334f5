use crate::command::CheckCommand;
use std::path::PathBuf;

/// 单个解析后的检查
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCheck {
    /// 检查名称，用于 PASS/FAIL 输出行
    pub name: String,

    /// 要执行的外部命令
    pub command: CheckCommand,

    /// 是否跳过该检查
    pub skip: bool,
}

impl ParsedCheck {
    pub fn new(name: impl Into<String>, command: CheckCommand) -> Self {
        Self {
            name: name.into(),
            command,
            skip: false,
        }
    }
}

/// 整个套件的解析结果
///
/// 空套件是合法的：没有检查的运行以 "Test passed" 结束。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedSuite {
    /// 解析出的所有检查，保持文档顺序
    pub checks: Vec<ParsedCheck>,

    /// 源文件路径（用于错误报告和历史记录）
    pub source_path: Option<PathBuf>,
}

impl ParsedSuite {
    /// 创建一个新的空套件
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置源文件路径
    pub fn with_source_path(mut self, path: PathBuf) -> Self {
        self.source_path = Some(path);
        self
    }

    /// 添加一个检查
    pub fn add_check(&mut self, check: ParsedCheck) {
        self.checks.push(check);
    }

    /// 获取所有未标记为跳过的检查
    pub fn active_checks(&self) -> impl Iterator<Item = &ParsedCheck> {
        self.checks.iter().filter(|c| !c.skip)
    }
}

/// 解析错误类型
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 不支持的套件文件格式
    #[error("Unsupported suite format '.{extension}': expected .toml or .md")]
    UnsupportedFormat { extension: String },

    /// TOML 结构错误
    #[error("Invalid suite file: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// 检查缺少命令
    #[error("Check '{name}' has no command")]
    MissingCommand { name: String },

    /// 检查同时给出了 command 和 run
    #[error("Check '{name}' sets both 'command' and 'run'")]
    AmbiguousCommand { name: String },

    /// 检查的命令文本无法切分
    #[error("Invalid command for check '{name}': {source}")]
    InvalidCommand {
        name: String,
        #[source]
        source: crate::command::SplitError,
    },

    /// Markdown 代码块中的命令行无法切分
    #[error("Invalid command line at line {line}: {source}")]
    InvalidCommandLine {
        line: usize,
        #[source]
        source: crate::command::SplitError,
    },

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 解析结果类型别名
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> CheckCommand {
        CheckCommand::from_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_parsed_check_new() {
        let check = ParsedCheck::new("init", command("wit init"));
        assert_eq!(check.name, "init");
        assert!(!check.skip);
    }

    #[test]
    fn test_parsed_suite_new() {
        let suite = ParsedSuite::new();
        assert_eq!(suite.checks.len(), 0);
        assert_eq!(suite.source_path, None);
    }

    #[test]
    fn test_parsed_suite_with_source_path() {
        let suite = ParsedSuite::new().with_source_path(PathBuf::from("/test/suite.toml"));
        assert_eq!(suite.source_path, Some(PathBuf::from("/test/suite.toml")));
    }

    #[test]
    fn test_active_checks() {
        let mut suite = ParsedSuite::new();

        let check1 = ParsedCheck::new("one", command("true"));
        let mut check2 = ParsedCheck::new("two", command("false"));
        check2.skip = true;

        suite.add_check(check1);
        suite.add_check(check2);

        let active: Vec<_> = suite.active_checks().collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "one");
    }
}
