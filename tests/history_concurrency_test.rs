use chrono::Utc;
use rucheck::history::model::RunRecord;
use rucheck::history::storage::HistoryStorage;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn create_dummy_record(id: String) -> RunRecord {
    RunRecord {
        id,
        timestamp: Utc::now(),
        suite: Some("suite.toml".to_string()),
        passed: 1,
        failed: 0,
        skipped: 0,
        duration_ms: 100,
        failed_checks: Vec::new(),
    }
}

#[test]
fn test_concurrent_writes() {
    let temp_dir = TempDir::new().unwrap();
    let history_file = temp_dir.path().join("history.jsonl");

    // Each thread builds its own Storage instance to simulate separate processes
    let history_path = Arc::new(history_file.clone());

    let mut handles = vec![];
    let thread_count = 10;
    let records_per_thread = 50;

    for i in 0..thread_count {
        let path = history_path.clone();
        handles.push(thread::spawn(move || {
            let storage = HistoryStorage::new_with_path((*path).clone());
            for j in 0..records_per_thread {
                let id = format!("{}-{}", i, j);
                // Tight loop to force lock contention
                storage.append(&create_dummy_record(id)).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Verify no record was lost or torn
    let storage = HistoryStorage::new_with_path(history_file);
    let records = storage.list().unwrap();

    assert_eq!(
        records.len(),
        thread_count * records_per_thread,
        "Total records count mismatch"
    );
}
