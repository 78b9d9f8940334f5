use super::model::RunRecord;
use crate::Result;
use crate::error::RucheckError;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const HISTORY_DIR: &str = ".rucheck";
const HISTORY_FILE: &str = "history.jsonl";
// 20 MB soft limit for compaction
const COMPACTION_THRESHOLD_BYTES: u64 = 20 * 1024 * 1024;
// Keep last 10,000 records
const MAX_RECORDS: usize = 10_000;

/// Append-only JSONL store for run records (project-local)
pub struct HistoryStorage {
    file_path: PathBuf,
}

impl HistoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with specific path (internal/testing use)
    pub fn new_with_path(path: PathBuf) -> Self {
        Self { file_path: path }
    }
}

impl Default for HistoryStorage {
    fn default() -> Self {
        let dir = std::env::var("RUCHECK_HISTORY_DIR").unwrap_or_else(|_| HISTORY_DIR.to_string());
        let path = Path::new(&dir).join(HISTORY_FILE);
        Self { file_path: path }
    }
}

impl HistoryStorage {
    /// Ensure directory exists
    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(RucheckError::IoError)?;
        }
        Ok(())
    }

    /// Append a new record
    ///
    /// # Concurrency Strategy
    /// Uses `fs2::lock_exclusive` so that several harness processes can
    /// share one history file without interleaving partial lines. The
    /// lock is held only for the duration of the write.
    pub fn append(&self, record: &RunRecord) -> Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string(record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .map_err(RucheckError::IoError)?;

        file.lock_exclusive().map_err(RucheckError::IoError)?;

        writeln!(file, "{}", json).map_err(RucheckError::IoError)?;

        // Unlock happens when the handle is dropped
        drop(file);

        Ok(())
    }

    /// List all records (possibly compacting first)
    pub fn list(&self) -> Result<Vec<RunRecord>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        // Lazy compaction: checked on read so the append path stays fast
        self.compact_if_needed()?;

        self.read_all()
    }

    /// Read last N records
    ///
    /// Returns records in chronological order (oldest -> newest); the
    /// printer reverses for "latest first" display.
    pub fn tail(&self, n: usize) -> Result<Vec<RunRecord>> {
        let records = self.list()?;
        let skip = records.len().saturating_sub(n);
        Ok(records.into_iter().skip(skip).collect())
    }

    fn read_all(&self) -> Result<Vec<RunRecord>> {
        // Shared lock so we never see a half-written line from a writer
        let file = fs::File::open(&self.file_path).map_err(RucheckError::IoError)?;
        file.lock_shared().map_err(RucheckError::IoError)?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(RucheckError::IoError)?;
            if line.trim().is_empty() {
                continue;
            }
            // Unparseable lines are skipped, not fatal
            if let Ok(record) = serde_json::from_str::<RunRecord>(&line) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Check file size and prune to the newest MAX_RECORDS if needed
    fn compact_if_needed(&self) -> Result<()> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.file_path)
            .map_err(RucheckError::IoError)?;

        // Size check first so most reads never take the exclusive lock
        let metadata = file.metadata().map_err(RucheckError::IoError)?;
        if metadata.len() < COMPACTION_THRESHOLD_BYTES {
            return Ok(());
        }

        file.lock_exclusive().map_err(RucheckError::IoError)?;

        // Re-check under the lock in case another process just compacted
        let metadata = file.metadata().map_err(RucheckError::IoError)?;
        if metadata.len() < COMPACTION_THRESHOLD_BYTES {
            return Ok(());
        }

        let reader = BufReader::new(&file);
        let mut records = Vec::new();
        for l in reader.lines().map_while(|l| l.ok()) {
            if let Ok(record) = serde_json::from_str::<RunRecord>(&l) {
                records.push(record);
            }
        }

        if records.len() <= MAX_RECORDS {
            return Ok(());
        }

        let skip_count = records.len() - MAX_RECORDS;
        let to_keep = records.iter().skip(skip_count);

        // Truncate and rewrite through the same locked handle
        file.set_len(0).map_err(RucheckError::IoError)?;
        let mut file = file;
        file.seek(std::io::SeekFrom::Start(0))
            .map_err(RucheckError::IoError)?;

        let mut writer = std::io::BufWriter::new(file);
        for record in to_keep {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json).map_err(RucheckError::IoError)?;
        }
        writer.flush().map_err(RucheckError::IoError)?;

        Ok(())
    }
}

/// Global instance helper
pub fn get_storage() -> &'static HistoryStorage {
    static STORAGE: OnceLock<HistoryStorage> = OnceLock::new();
    STORAGE.get_or_init(HistoryStorage::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_dummy_record(id: &str) -> RunRecord {
        RunRecord {
            id: id.to_string(),
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
    fn test_append_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("history.jsonl");

        let storage = HistoryStorage::new_with_path(file_path);

        storage.append(&create_dummy_record("1")).unwrap();
        storage.append(&create_dummy_record("2")).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "1");
        assert_eq!(list[1].id, "2");
    }

    #[test]
    fn test_tail() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("history.jsonl");
        let storage = HistoryStorage::new_with_path(file_path);

        for i in 0..10 {
            storage.append(&create_dummy_record(&i.to_string())).unwrap();
        }

        let tail = storage.tail(3).unwrap();
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].id, "7");
        assert_eq!(tail[2].id, "9");
    }

    #[test]
    fn test_list_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = HistoryStorage::new_with_path(temp_dir.path().join("none.jsonl"));
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_garbage_lines_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("history.jsonl");
        let storage = HistoryStorage::new_with_path(file_path.clone());

        storage.append(&create_dummy_record("good")).unwrap();
        let mut file = OpenOptions::new().append(true).open(&file_path).unwrap();
        writeln!(file, "{{not json").unwrap();
        drop(file);
        storage.append(&create_dummy_record("also good")).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
    }
}
