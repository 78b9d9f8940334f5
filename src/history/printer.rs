use super::model::RunRecord;
use super::storage::get_storage;
use crate::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};
use regex::Regex;

/// 表格形式列出最近的运行记录，最新在前
///
/// `filter` 是套件路径的正则，匹配不到路径的记录（含无路径
/// 记录）被过滤掉。
pub fn list_history(limit: usize, filter: Option<&Regex>) -> Result<()> {
    let storage = get_storage();
    let mut records = storage.tail(limit)?;
    records.reverse();

    if let Some(re) = filter {
        records.retain(|r| r.suite.as_deref().is_some_and(|s| re.is_match(s)));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID", "Time", "Suite", "Passed", "Failed", "Verdict", "Duration",
    ]);

    for record in &records {
        table.add_row(vec![
            Cell::new(&record.id[..8]), // Short ID
            Cell::new(record.timestamp.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(record.suite.as_deref().unwrap_or("-")).add_attribute(Attribute::Dim),
            Cell::new(record.passed).fg(Color::Green),
            Cell::new(record.failed).fg(if record.failed == 0 {
                Color::Green
            } else {
                Color::Red
            }),
            verdict_cell(record),
            Cell::new(format!("{}ms", record.duration_ms)),
        ]);
    }

    println!("{}", table);

    Ok(())
}

/// 打印单条记录的细节（交互式选择后使用）
pub fn print_record_detail(record: &RunRecord) {
    println!("Run {}", record.id);
    println!("  time:    {}", record.timestamp.format("%Y-%m-%d %H:%M:%S"));
    if let Some(suite) = &record.suite {
        println!("  suite:   {}", suite);
    }
    println!(
        "  checks:  {} passed, {} failed, {} skipped",
        record.passed, record.failed, record.skipped
    );
    println!("  verdict: {}", record.verdict_label());
    println!("  time:    {}ms", record.duration_ms);

    if !record.failed_checks.is_empty() {
        println!("  failed checks:");
        for name in &record.failed_checks {
            println!("    - {}", name);
        }
    }
}

fn verdict_cell(record: &RunRecord) -> Cell {
    if record.all_passed() {
        Cell::new("passed").fg(Color::Green)
    } else {
        Cell::new("failed").fg(Color::Red)
    }
}
