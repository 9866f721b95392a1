use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info, warn};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::{CacheRecord, HistoryEntry, Question};

/// Reasons the cache could not be read or written. Logged, never returned
/// from [`CacheStore`] methods.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid cache document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode cache document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Outcome of looking for today's question in a loaded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(Question),
    Miss,
}

/// Storage for the [`CacheRecord`].
pub trait CacheStore {
    /// The persisted record, or an empty one if nothing usable is stored.
    fn load(&self) -> CacheRecord;

    /// Replaces the stored record with today's question and the bounded history.
    fn commit(&self, today: NaiveDate, question: &Question, prior_history: &[HistoryEntry]);

    fn get_today_or_miss(&self, record: &CacheRecord, today: NaiveDate) -> CacheLookup {
        match record.today_question(today) {
            Some(question) => CacheLookup::Hit(question.clone()),
            None => CacheLookup::Miss,
        }
    }
}

/// JSON file backed store.
#[derive(Debug, Clone)]
pub struct DailyCacheStore {
    path: PathBuf,
}

impl DailyCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Option<CacheRecord>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| CacheError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn try_write(&self, record: &CacheRecord) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(record)?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        fs::create_dir_all(dir).map_err(io_err)?;

        let mut temp = NamedTempFile::new_in(dir).map_err(io_err)?;
        temp.write_all(json.as_bytes()).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&self.path)
            .map_err(|source| CacheError::Persist {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }
}

impl CacheStore for DailyCacheStore {
    fn load(&self) -> CacheRecord {
        match self.try_load() {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("no quiz cache at {}", self.path.display());
                CacheRecord::default()
            }
            Err(err) => {
                warn!("ignoring quiz cache: {err}");
                CacheRecord::default()
            }
        }
    }

    fn commit(&self, today: NaiveDate, question: &Question, prior_history: &[HistoryEntry]) {
        let record = CacheRecord::for_day(today, question.clone(), prior_history);

        match self.try_write(&record) {
            Ok(()) => info!(
                "cached question for {today} ({} history entries)",
                record.history.len()
            ),
            Err(err) => warn!("failed to save quiz cache: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HISTORY_LIMIT;

    fn day(n: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap() + chrono::Days::new(n)
    }

    fn sample() -> Question {
        Question::new(
            "What is the capital of Australia?",
            "Canberra",
            ["Sydney", "Melbourne", "Brisbane"],
        )
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyCacheStore::new(dir.path().join("quiz_cache.json"));
        assert_eq!(store.path(), dir.path().join("quiz_cache.json"));
        assert_eq!(store.load(), CacheRecord::default());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz_cache.json");
        fs::write(&path, "{ not json").unwrap();

        let store = DailyCacheStore::new(&path);
        assert_eq!(store.load(), CacheRecord::default());
    }

    #[test]
    fn test_partial_document_keeps_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz_cache.json");
        fs::write(
            &path,
            r#"{"current_date":"2024-05-01","current_question":{"question":"q","correct_answer":"a"},"history":[{"date":"2024-04-30","question":"old"}]}"#,
        )
        .unwrap();

        let store = DailyCacheStore::new(&path);
        let record = store.load();

        assert_eq!(store.get_today_or_miss(&record, day(0)), CacheLookup::Miss);
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].question_text, "old");
    }

    #[test]
    fn test_commit_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyCacheStore::new(dir.path().join("nested").join("quiz_cache.json"));

        store.commit(day(0), &sample(), &[]);
        let record = store.load();

        assert_eq!(store.get_today_or_miss(&record, day(0)), CacheLookup::Hit(sample()));
        assert_eq!(store.get_today_or_miss(&record, day(1)), CacheLookup::Miss);
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].date, day(0));
        assert_eq!(record.history[0].question_text, sample().text);
    }

    #[test]
    fn test_written_document_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz_cache.json");
        DailyCacheStore::new(&path).commit(day(0), &sample(), &[]);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["current_date"], "2024-05-01");
        assert_eq!(value["current_question"]["correct_answer"], "Canberra");
        assert_eq!(value["history"][0]["date"], "2024-05-01");
        assert_eq!(value["history"][0]["question"], sample().text);
        assert_eq!(value["version"], 1);
    }

    #[test]
    fn test_history_is_bounded_across_days() {
        let dir = tempfile::tempdir().unwrap();
        let store = DailyCacheStore::new(dir.path().join("quiz_cache.json"));

        for n in 0..31 {
            let record = store.load();
            store.commit(day(n), &sample(), &record.history);
        }

        let history = store.load().history;
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].date, day(1));
        assert_eq!(history.last().map(|e| e.date), Some(day(30)));
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_failed_write_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz_cache.json");
        let store = DailyCacheStore::new(&path);
        store.commit(day(0), &sample(), &[]);

        // A directory where the parent should be makes every write fail.
        let blocked = DailyCacheStore::new(path.join("child.json"));
        blocked.commit(day(1), &sample(), &[]);

        assert_eq!(blocked.load(), CacheRecord::default());
        assert_eq!(store.load().current_date, Some(day(0)));
    }
}
