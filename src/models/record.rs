use chrono::NaiveDate;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Question;

/// Maximum number of history entries kept on disk.
pub const HISTORY_LIMIT: usize = 30;

/// Version written into new cache documents. Documents without one are
/// read as unversioned and treated the same way.
pub const RECORD_VERSION: u32 = 1;

/// A past day's question, kept for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    #[serde(rename = "question")]
    pub question_text: String,
}

/// The persisted cache document.
///
/// Every field defaults when absent or unreadable so older or partial
/// documents still load; they just produce a cache miss. Unreadable history
/// entries are dropped one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_question: Option<Question>,
    #[serde(default, deserialize_with = "lenient_history")]
    pub history: Vec<HistoryEntry>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            warn!("ignoring unreadable cache field: {err}");
            Ok(None)
        }
    }
}

fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        warn!("ignoring cache history that is not a list");
        return Ok(Vec::new());
    };

    let total = items.len();
    let history: Vec<HistoryEntry> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if history.len() < total {
        warn!("dropped {} unreadable history entries", total - history.len());
    }
    Ok(history)
}

impl CacheRecord {
    /// Today's cached question, if the record is from `today` and holds one.
    pub fn today_question(&self, today: NaiveDate) -> Option<&Question> {
        match (self.current_date, &self.current_question) {
            (Some(date), Some(question)) if date == today => Some(question),
            _ => None,
        }
    }

    /// Builds the record committed for `today`: the prior history cut to its
    /// last `HISTORY_LIMIT - 1` entries plus one new entry.
    pub fn for_day(today: NaiveDate, question: Question, prior_history: &[HistoryEntry]) -> Self {
        let keep_from = prior_history.len().saturating_sub(HISTORY_LIMIT - 1);
        let mut history = prior_history[keep_from..].to_vec();
        history.push(HistoryEntry {
            date: today,
            question_text: question.text.clone(),
        });

        Self {
            version: Some(RECORD_VERSION),
            current_date: Some(today),
            current_question: Some(question),
            history,
        }
    }
}
