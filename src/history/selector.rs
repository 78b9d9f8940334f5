use crate::Result;
use crate::RucheckError;
use crate::history::model::RunRecord;
use crate::history::printer::print_record_detail;
use crate::history::storage::HistoryStorage;
use inquire::Select;

/// Selection strategy for history records
pub enum SelectionStrategy {
    Interactive,
    Last(usize),
}

/// Select run records based on the given strategy
pub fn select_records(
    storage: &HistoryStorage,
    strategy: SelectionStrategy,
) -> Result<Vec<RunRecord>> {
    match strategy {
        SelectionStrategy::Interactive => select_interactive(storage),
        SelectionStrategy::Last(n) => storage.tail(n),
    }
}

/// Interactively pick one recent run and print its detail
pub fn show_interactive(storage: &HistoryStorage) -> Result<()> {
    let records = select_interactive(storage)?;
    match records.first() {
        Some(record) => print_record_detail(record),
        None => println!("No run history yet"),
    }
    Ok(())
}

/// Interactively select a run record using a TUI prompt
fn select_interactive(storage: &HistoryStorage) -> Result<Vec<RunRecord>> {
    // 1. Fetch recent history, latest first
    let mut records = storage.tail(50)?;
    records.reverse();

    if records.is_empty() {
        return Ok(Vec::new());
    }

    // 2. Format options using helper
    let options: Vec<String> = records.iter().map(format_record_for_display).collect();

    // 3. Prompt user, map the chosen label back to its index
    let choice = Select::new("Select a run:", options.clone())
        .prompt()
        .map_err(|e| RucheckError::Other(format!("Selection cancelled: {}", e)))?;

    let index = options
        .iter()
        .position(|o| *o == choice)
        .unwrap_or_default();

    Ok(vec![records.swap_remove(index)])
}

/// One-line label for the selection prompt
fn format_record_for_display(record: &RunRecord) -> String {
    format!(
        "{} [{}] {} - {} passed, {} failed",
        record.timestamp.format("%m-%d %H:%M:%S"),
        &record.id[..8],
        record.suite.as_deref().unwrap_or("-"),
        record.passed,
        record.failed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(id: &str, failed: usize) -> RunRecord {
        RunRecord {
            id: id.to_string(),
            timestamp: Utc::now(),
            suite: Some("suite.toml".to_string()),
            passed: 3,
            failed,
            skipped: 0,
            duration_ms: 10,
            failed_checks: Vec::new(),
        }
    }

    #[test]
    fn test_select_last_n() {
        let temp_dir = TempDir::new().unwrap();
        let storage = HistoryStorage::new_with_path(temp_dir.path().join("history.jsonl"));
        for i in 0..5 {
            storage.append(&record(&format!("run-{:04}", i), 0)).unwrap();
        }

        let selected = select_records(&storage, SelectionStrategy::Last(2)).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, "run-0003");
        assert_eq!(selected[1].id, "run-0004");
    }

    #[test]
    fn test_format_record_for_display() {
        let label = format_record_for_display(&record("abcdef1234567890", 2));
        assert!(label.contains("abcdef12"));
        assert!(label.contains("suite.toml"));
        assert!(label.contains("2 failed"));
    }
}
