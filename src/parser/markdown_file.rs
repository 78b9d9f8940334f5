use crate::command::CheckCommand;
use crate::parser::types::{ParseError, ParseResult, ParsedCheck, ParsedSuite};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use std::path::Path;

/// Markdown 套件文档解析器
///
/// 提取所有 ```check 围栏代码块，块中每个非空、非 `#` 注释行
/// 是一条检查命令。检查以最近的前置标题命名；同一个块里有多条
/// 命令时名称追加 " #N"。`# skip` 注释行使块中其余命令被跳过。
pub struct MarkdownSuiteParser;

impl MarkdownSuiteParser {
    /// 从文件路径解析
    pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedSuite> {
        let content = std::fs::read_to_string(&path)?;
        let mut parsed = Self::parse_content(&content)?;
        parsed.source_path = Some(path.as_ref().to_path_buf());
        Ok(parsed)
    }

    /// 从字符串内容解析
    pub fn parse_content(content: &str) -> ParseResult<ParsedSuite> {
        let blocks = Self::extract_check_blocks(content);

        let mut suite = ParsedSuite::new();
        for block in blocks {
            Self::parse_block(&block, &mut suite)?;
        }

        Ok(suite)
    }

    /// 提取所有 check 代码块（使用 pulldown-cmark）
    fn extract_check_blocks(content: &str) -> Vec<ExtractedCheckBlock> {
        let parser = Parser::new(content).into_offset_iter();

        let mut blocks = Vec::new();
        let mut current_header: Option<String> = None;
        let mut in_check_block = false;
        let mut current_code = String::new();
        let mut block_start_line = 0;
        let mut is_capturing_header = false;
        let mut header_text = String::new();

        for (event, range) in parser {
            match event {
                // 标题开始
                Event::Start(Tag::Heading { .. }) => {
                    is_capturing_header = true;
                    header_text.clear();
                }

                // 标题结束
                Event::End(TagEnd::Heading(..)) => {
                    if is_capturing_header && !header_text.is_empty() {
                        current_header = Some(header_text.clone());
                    }
                    is_capturing_header = false;
                }

                // 文本内容
                Event::Text(text) => {
                    if is_capturing_header {
                        header_text.push_str(&text);
                    } else if in_check_block {
                        current_code.push_str(&text);
                    }
                }

                // 代码块开始
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                    if lang.to_string().to_lowercase() == "check" {
                        in_check_block = true;
                        current_code.clear();
                        // 围栏行的下一行才是块内容
                        block_start_line = line_of_offset(content, range.start) + 1;
                    }
                }

                // 代码块结束
                Event::End(TagEnd::CodeBlock) => {
                    if in_check_block {
                        blocks.push(ExtractedCheckBlock {
                            content: current_code.clone(),
                            preceding_header: current_header.clone(),
                            start_line: block_start_line,
                        });

                        in_check_block = false;
                        current_code.clear();
                    }
                }

                _ => {}
            }
        }

        blocks
    }

    /// 把单个代码块的命令行转换为检查
    fn parse_block(block: &ExtractedCheckBlock, suite: &mut ParsedSuite) -> ParseResult<()> {
        // 第一遍：收集命令行和跳过标记
        let mut commands = Vec::new();
        let mut skip_rest = false;

        for (offset, raw_line) in block.content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if comment.trim().eq_ignore_ascii_case("skip") {
                    skip_rest = true;
                }
                continue;
            }

            let line_number = block.start_line + offset;
            let command = match CheckCommand::from_line(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(source) => {
                    return Err(ParseError::InvalidCommandLine {
                        line: line_number,
                        source,
                    });
                }
            };

            commands.push((line.to_string(), command, skip_rest));
        }

        // 第二遍：命名并入套件
        let total = commands.len();
        for (index, (text, command, skip)) in commands.into_iter().enumerate() {
            let name = match &block.preceding_header {
                Some(header) if total > 1 => format!("{} #{}", header, index + 1),
                Some(header) => header.clone(),
                // 没有标题时用命令文本本身作为名称
                None => text,
            };

            let mut check = ParsedCheck::new(name, command);
            check.skip = skip;
            suite.add_check(check);
        }

        Ok(())
    }
}

/// 1-based 行号
fn line_of_offset(content: &str, offset: usize) -> usize {
    content[..offset.min(content.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

#[derive(Debug)]
struct ExtractedCheckBlock {
    content: String,
    preceding_header: Option<String>,
    start_line: usize,
}
