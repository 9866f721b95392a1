mod question;
mod record;

pub use question::Question;
pub use record::{CacheRecord, HistoryEntry, HISTORY_LIMIT, RECORD_VERSION};
