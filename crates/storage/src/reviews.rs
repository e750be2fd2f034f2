//! Review Document Store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::StorageError;

/// Name recorded when the reviewer leaves it out
pub const DEFAULT_REVIEWER: &str = "Anonymous";
/// Rating recorded when the reviewer leaves it out
pub const DEFAULT_RATING: i64 = 5;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Review as submitted; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReview {
    pub name: Option<String>,
    /// Not range-checked; 1-5 is a client convention
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

/// Stored review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub name: String,
    pub rating: i64,
    pub comment: String,
    pub timestamp: String,
}

impl NewReview {
    fn into_entry(self, at: NaiveDateTime) -> ReviewEntry {
        ReviewEntry {
            name: self.name.unwrap_or_else(|| DEFAULT_REVIEWER.to_string()),
            rating: self.rating.unwrap_or(DEFAULT_RATING),
            comment: self.comment.unwrap_or_default(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Append-only review list persisted as one JSON array.
///
/// Every submission loads the whole document, appends, and rewrites it.
/// Writers in this process are serialized; separate processes sharing the
/// file are not coordinated.
pub struct ReviewStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReviewStore {
    /// Open a store backed by `path`. The file is created on first submit.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Review store at {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Append a review stamped with the current local time
    pub fn submit(&self, review: NewReview) -> Result<ReviewEntry, StorageError> {
        self.submit_at(review, Local::now().naive_local())
    }

    /// Append a review stamped with `at`
    pub fn submit_at(
        &self,
        review: NewReview,
        at: NaiveDateTime,
    ) -> Result<ReviewEntry, StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?;

        let mut reviews = self.load()?;
        let entry = review.into_entry(at);
        reviews.push(entry.clone());
        self.store(&reviews)?;

        debug!("Stored review #{} from {}", reviews.len(), entry.name);
        Ok(entry)
    }

    /// All reviews in submission order
    pub fn list(&self) -> Result<Vec<ReviewEntry>, StorageError> {
        self.load()
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<ReviewEntry>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn store(&self, reviews: &[ReviewEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(reviews)?;

        // Write beside the target and rename so readers never see a torn file.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn store() -> (tempfile::TempDir, ReviewStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ReviewStore::open(dir.path().join("reviews.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_lists_empty() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_defaults() {
        let (_dir, store) = store();
        let entry = store.submit_at(NewReview::default(), at(9, 5)).unwrap();

        assert_eq!(entry.name, "Anonymous");
        assert_eq!(entry.rating, 5);
        assert_eq!(entry.comment, "");
        assert_eq!(entry.timestamp, "2024-06-15 09:05:00");
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let (_dir, store) = store();

        let submitted: Vec<ReviewEntry> = (0..5)
            .map(|i| {
                store
                    .submit_at(
                        NewReview {
                            name: Some(format!("user-{i}")),
                            rating: Some(i),
                            comment: Some(format!("comment \"{i}\" ✓")),
                        },
                        at(10, i as u32),
                    )
                    .unwrap()
            })
            .collect();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed, submitted);
        assert_eq!(listed[3].name, "user-3");
        assert_eq!(listed[3].comment, "comment \"3\" ✓");
    }

    #[test]
    fn test_rating_is_not_range_checked() {
        let (_dir, store) = store();
        let entry = store
            .submit_at(
                NewReview {
                    rating: Some(42),
                    ..Default::default()
                },
                at(12, 0),
            )
            .unwrap();
        assert_eq!(entry.rating, 42);
        assert_eq!(store.list().unwrap()[0].rating, 42);
    }

    #[test]
    fn test_document_is_a_json_array() {
        let (_dir, store) = store();
        store.submit_at(NewReview::default(), at(8, 0)).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["name"], "Anonymous");
    }

    #[test]
    fn test_empty_file_lists_empty() {
        let (_dir, store) = store();
        fs::write(store.path(), "  \n").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let (_dir, store) = store();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.list(), Err(StorageError::SerializationError(_))));
        assert!(matches!(
            store.submit(NewReview::default()),
            Err(StorageError::SerializationError(_))
        ));
    }

    #[test]
    fn test_reopen_sees_existing_reviews() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");

        ReviewStore::open(&path)
            .submit_at(NewReview::default(), at(7, 0))
            .unwrap();
        let reopened = ReviewStore::open(&path);
        assert_eq!(reopened.list().unwrap().len(), 1);
    }
}
