//! Record store abstraction and its backends.
//!
//! The exercise service talks only to [`RecordStore`]; it never sees how a
//! backend evaluates a filter or assigns identifiers.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::{Error, ExerciseFilter, ExerciseId, ExerciseRecord, NewExercise, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Minimal capability set the exercise service needs from persistence
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record and return the identifier the store assigned.
    async fn insert_one(&self, exercise: NewExercise) -> Result<ExerciseId>;

    async fn find_one_by_id(&self, id: &ExerciseId) -> Result<Option<ExerciseRecord>>;

    /// Records matching `filter`, in insertion order.
    async fn find_many(&self, filter: &ExerciseFilter) -> Result<Vec<ExerciseRecord>>;

    /// Overwrite every field of an existing record. Returns the matched count.
    async fn replace_one_by_id(&self, id: &ExerciseId, exercise: NewExercise) -> Result<u64>;

    /// Returns the matched count.
    async fn delete_one_by_id(&self, id: &ExerciseId) -> Result<u64>;
}

/// Open the store named by a connection string.
///
/// Supported forms:
/// - `memory:` / `memory://` for a process-local store
/// - `file://<path>` / `file:<path>` for a JSON document file
pub async fn connect(connection_string: &str) -> Result<Arc<dyn RecordStore>> {
    let conn = connection_string.trim();

    if conn == "memory:" || conn == "memory://" {
        tracing::info!("Using in-memory exercise store");
        return Ok(Arc::new(InMemoryStore::new()));
    }

    let path = conn
        .strip_prefix("file://")
        .or_else(|| conn.strip_prefix("file:"))
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| {
            Error::Config(format!("unsupported store connection string: {:?}", conn))
        })?;

    let store = JsonFileStore::open(path).await?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExerciseDate, Unit};

    fn squat() -> NewExercise {
        NewExercise::new("squat", 5, 135.0, Unit::Lbs, ExerciseDate::parse("04-01-22").unwrap())
            .unwrap()
    }

    #[tokio::test]
    async fn test_connect_memory() {
        let store = connect("memory:").await.unwrap();
        let id = store.insert_one(squat()).await.unwrap();
        assert!(store.find_one_by_id(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_connect_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exercises.json");
        let conn = format!("file://{}", path.display());

        let store = connect(&conn).await.unwrap();
        store.insert_one(squat()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        for conn in ["mongodb://localhost/exercises", "", "file://"] {
            let err = connect(conn).await.err().unwrap();
            assert!(matches!(err, Error::Config(_)), "{:?} should be rejected", conn);
        }
    }
}
