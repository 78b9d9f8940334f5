use crate::command::CheckCommand;
use crate::parser::types::{ParseError, ParseResult, ParsedCheck, ParsedSuite};
use serde::Deserialize;
use std::path::Path;

/// TOML 套件文件解析器
///
/// 文件格式：
/// ```toml
/// [[check]]
/// name = "init creates workspace"
/// command = ["wit", "init"]
///
/// [[check]]
/// name = "status runs clean"
/// run = "wit status --all"
/// skip = true
/// ```
///
/// `command`（字符串数组）和 `run`（整行文本，按引号规则切分）
/// 二选一，必须给出其中一个。
pub struct TomlSuiteParser;

/// 套件文件的顶层结构
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuiteDoc {
    #[serde(default)]
    check: Vec<CheckEntry>,
}

/// 单个 [[check]] 条目
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckEntry {
    name: String,

    #[serde(default)]
    command: Option<Vec<String>>,

    #[serde(default)]
    run: Option<String>,

    #[serde(default)]
    skip: bool,
}

impl TomlSuiteParser {
    /// 从文件路径解析
    pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedSuite> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut parsed = Self::parse_content(&content)?;
        parsed.source_path = Some(path.as_ref().to_path_buf());
        Ok(parsed)
    }

    /// 从字符串内容解析
    pub fn parse_content(content: &str) -> ParseResult<ParsedSuite> {
        let doc: SuiteDoc = toml::from_str(content)?;

        let mut suite = ParsedSuite::new();
        for entry in doc.check {
            suite.add_check(Self::convert_entry(entry)?);
        }

        Ok(suite)
    }

    /// 校验并转换单个条目
    fn convert_entry(entry: CheckEntry) -> ParseResult<ParsedCheck> {
        let command = match (entry.command, entry.run) {
            (Some(_), Some(_)) => {
                return Err(ParseError::AmbiguousCommand { name: entry.name });
            }
            (Some(argv), None) => CheckCommand::from_argv(argv).ok_or(ParseError::MissingCommand {
                name: entry.name.clone(),
            })?,
            (None, Some(line)) => CheckCommand::from_line(&line)
                .map_err(|source| ParseError::InvalidCommand {
                    name: entry.name.clone(),
                    source,
                })?
                .ok_or(ParseError::MissingCommand {
                    name: entry.name.clone(),
                })?,
            (None, None) => {
                return Err(ParseError::MissingCommand { name: entry.name });
            }
        };

        Ok(ParsedCheck {
            name: entry.name,
            command,
            skip: entry.skip,
        })
    }
}
