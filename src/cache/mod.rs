//! On-disk persistence of the daily question and its history.

mod store;

pub use store::{CacheError, CacheLookup, CacheStore, DailyCacheStore};
