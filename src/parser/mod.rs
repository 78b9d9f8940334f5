pub mod markdown_file;
pub mod toml_file;
pub mod types;

// Re-export commonly used types
pub use markdown_file::MarkdownSuiteParser;
pub use toml_file::TomlSuiteParser;
pub use types::{ParseError, ParseResult, ParsedCheck, ParsedSuite};

use std::path::Path;

/// 从文件路径解析检查套件，按扩展名选择解析器
///
/// - `.toml` → TOML 套件文件
/// - `.md` / `.markdown` → Markdown 套件文档
pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedSuite> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "toml" => TomlSuiteParser::parse_file(path),
        "md" | "markdown" => MarkdownSuiteParser::parse_file(path),
        other => Err(ParseError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}
