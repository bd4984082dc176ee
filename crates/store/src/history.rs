//! Append-only report history logs.
//!
//! Both logs assign identities and append under a single lock, so concurrent
//! writers never share an id or interleave partial entries.

use parking_lot::Mutex;
use rewards_core::store::ReportStore;
use rewards_core::types::{NewReport, Report};
use rewards_core::{StoreError, StoreResult};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Volatile history log, used by tests and the `memory` backend.
pub struct InMemoryReportLog {
    entries: Mutex<Vec<Report>>,
}

impl InMemoryReportLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for InMemoryReportLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore for InMemoryReportLog {
    fn save(&self, report: NewReport) -> StoreResult<Report> {
        let mut entries = self.entries.lock();
        let id = entries.last().map(|r| r.id + 1).unwrap_or(1);
        let stored = report.with_id(id);
        entries.push(stored.clone());
        metrics::counter!("history.appends").increment(1);
        Ok(stored)
    }

    fn find_all(&self) -> StoreResult<Vec<Report>> {
        Ok(self.entries.lock().clone())
    }
}

// ─── JSON Lines log ─────────────────────────────────────────────────────────

struct LogState {
    file: File,
    next_id: u64,
    /// Set when a failed append could not be rolled back; the file tail is
    /// unknown, so further appends are refused.
    needs_recovery: bool,
}

/// Durable history log: one JSON object per line. Each append is flushed and
/// synced before `save` returns.
pub struct JsonlReportLog {
    path: PathBuf,
    state: Mutex<LogState>,
}

impl JsonlReportLog {
    /// Open (or create) the log at `path`, replaying existing entries to
    /// recover the next identity.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let existing = if path.exists() {
            read_entries(&path)?
        } else {
            Vec::new()
        };
        let next_id = existing.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        info!(
            path = %path.display(),
            entries = existing.len(),
            next_id = next_id,
            "Report history log opened"
        );

        Ok(Self {
            path,
            state: Mutex::new(LogState {
                file,
                next_id,
                needs_recovery: false,
            }),
        })
    }
}

impl ReportStore for JsonlReportLog {
    fn save(&self, report: NewReport) -> StoreResult<Report> {
        let mut state = self.state.lock();
        if state.needs_recovery {
            return Err(StoreError::Unavailable(format!(
                "history log {} has an unrecoverable partial entry",
                self.path.display()
            )));
        }
        let stored = report.with_id(state.next_id);

        let mut line = serde_json::to_string(&stored)?;
        line.push('\n');
        let appended = append_or_rollback(&mut state.file, |file| {
            file.write_all(line.as_bytes())?;
            file.flush()?;
            file.sync_data()
        });
        if let Err(e) = appended {
            if matches!(e, AppendError::RollbackFailed(_)) {
                state.needs_recovery = true;
            }
            return Err(e.into_io().into());
        }
        // Only a fully synced line consumes its id.
        state.next_id += 1;

        metrics::counter!("history.appends").increment(1);
        debug!(id = stored.id, metric = %stored.metric, "Report history entry appended");
        Ok(stored)
    }

    fn find_all(&self) -> StoreResult<Vec<Report>> {
        // Hold the lock so a concurrent append is never observed half-written.
        let _state = self.state.lock();
        read_entries(&self.path)
    }
}

enum AppendError {
    /// The write failed and the file was truncated back to its prior length.
    RolledBack(io::Error),
    /// The write failed and truncation failed too.
    RollbackFailed(io::Error),
}

impl AppendError {
    fn into_io(self) -> io::Error {
        match self {
            AppendError::RolledBack(e) | AppendError::RollbackFailed(e) => e,
        }
    }
}

/// Run `write` at the end of `file`. On failure the file is cut back to its
/// previous length so no partial line survives.
fn append_or_rollback<F>(file: &mut File, write: F) -> Result<(), AppendError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let prev_len = file.metadata().map_err(AppendError::RolledBack)?.len();
    match write(file) {
        Ok(()) => Ok(()),
        Err(e) => match file.set_len(prev_len) {
            Ok(()) => {
                warn!(error = %e, len = prev_len, "History append failed, rolled back");
                Err(AppendError::RolledBack(e))
            }
            Err(rollback) => {
                error!(
                    error = %e,
                    rollback_error = %rollback,
                    len = prev_len,
                    "History append failed and could not be rolled back"
                );
                Err(AppendError::RollbackFailed(e))
            }
        },
    }
}

fn read_entries(path: &Path) -> StoreResult<Vec<Report>> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let report: Report = serde_json::from_str(&line).map_err(|e| StoreError::Corrupt {
            line: idx + 1,
            reason: e.to_string(),
        })?;
        entries.push(report);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(metric: &str) -> NewReport {
        NewReport::for_request(metric, "2024-01-01", "2024-01-31")
    }

    #[test]
    fn test_memory_log_assigns_increasing_ids() {
        let log = InMemoryReportLog::new();
        assert!(log.find_all().unwrap().is_empty());

        let a = log.save(entry("users")).unwrap();
        let b = log.save(entry("offers")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        let all = log.find_all().unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[test]
    fn test_memory_log_concurrent_appends() {
        let log = Arc::new(InMemoryReportLog::new());
        std::thread::scope(|s| {
            for t in 0..8 {
                let log = log.clone();
                s.spawn(move || {
                    for _ in 0..25 {
                        log.save(entry(&format!("metric-{t}"))).unwrap();
                    }
                });
            }
        });

        let all = log.find_all().unwrap();
        assert_eq!(all.len(), 200);
        let ids: Vec<u64> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=200).collect::<Vec<_>>());
    }

    #[test]
    fn test_jsonl_log_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.jsonl");

        {
            let log = JsonlReportLog::open(&path).unwrap();
            assert!(log.find_all().unwrap().is_empty());
            log.save(entry("users")).unwrap();
            log.save(entry("bogus-metric")).unwrap();
        }

        let log = JsonlReportLog::open(&path).unwrap();
        let third = log.save(entry("redemption")).unwrap();
        assert_eq!(third.id, 3);

        let all = log.find_all().unwrap();
        let metrics: Vec<&str> = all.iter().map(|r| r.metric.as_str()).collect();
        assert_eq!(metrics, vec!["users", "bogus-metric", "redemption"]);
        assert_eq!(all[0].date_range, "2024-01-01 → 2024-01-31");
    }

    #[test]
    fn test_jsonl_failed_append_leaves_log_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");

        let log = JsonlReportLog::open(&path).unwrap();
        log.save(entry("users")).unwrap();
        let len_before = fs::metadata(&path).unwrap().len();

        // A write cut short by the filesystem, e.g. EFBIG under a size limit.
        {
            let mut state = log.state.lock();
            let result = append_or_rollback(&mut state.file, |file| {
                file.write_all(b"{\"id\":2,\"metric\":\"xxxxxxxx")?;
                Err(io::Error::other("File too large"))
            });
            assert!(matches!(result, Err(AppendError::RolledBack(_))));
        }
        assert_eq!(fs::metadata(&path).unwrap().len(), len_before);

        let next = log.save(entry("offers")).unwrap();
        assert_eq!(next.id, 2);
        drop(log);

        let reopened = JsonlReportLog::open(&path).unwrap();
        let ids: Vec<u64> = reopened.find_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(reopened.save(entry("redemption")).unwrap().id, 3);
    }

    #[test]
    fn test_jsonl_failed_sync_does_not_consume_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let log = JsonlReportLog::open(&path).unwrap();

        // Full line written, then the durability step fails.
        {
            let mut state = log.state.lock();
            let result = append_or_rollback(&mut state.file, |file| {
                let line = serde_json::to_string(&entry("users").with_id(1)).unwrap();
                writeln!(file, "{line}")?;
                Err(io::Error::other("sync failed"))
            });
            assert!(result.is_err());
            assert!(!state.needs_recovery);
        }

        assert_eq!(log.save(entry("users")).unwrap().id, 1);
        let all = JsonlReportLog::open(&path).unwrap().find_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 1);
    }

    #[test]
    fn test_jsonl_log_rejects_corrupt_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        fs::write(&path, "{\"id\":1,\"metric\":\"users\"\nnot json\n").unwrap();

        match JsonlReportLog::open(&path) {
            Err(StoreError::Corrupt { line, .. }) => assert_eq!(line, 1),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("corrupt log opened"),
        }
    }

    #[test]
    fn test_jsonl_log_concurrent_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(JsonlReportLog::open(dir.path().join("h.jsonl")).unwrap());

        std::thread::scope(|s| {
            for _ in 0..4 {
                let log = log.clone();
                s.spawn(move || {
                    for _ in 0..10 {
                        log.save(entry("users")).unwrap();
                    }
                });
            }
        });

        let mut ids: Vec<u64> = log.find_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 40);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 40);
    }
}
