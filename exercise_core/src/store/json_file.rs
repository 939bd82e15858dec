//! JSON document file store.
//!
//! All records live in a single JSON array on disk. The file is read once at
//! open time; every mutation rewrites it atomically and only then updates the
//! in-memory view, so a failed write leaves both unchanged. Reads share the
//! view and only wait while a mutation is committing.

use super::RecordStore;
use crate::{Error, ExerciseFilter, ExerciseId, ExerciseRecord, NewExercise, Result};
use async_trait::async_trait;
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::RwLock;

/// Record store backed by a JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: RwLock<Vec<ExerciseRecord>>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store. A file that exists but cannot be
    /// parsed is an error; it is never silently replaced.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let load_path = path.clone();
        let records = tokio::task::spawn_blocking(move || load_records(&load_path))
            .await
            .map_err(|e| Error::Persistence(format!("store load task failed: {}", e)))??;

        tracing::info!("Opened exercise store {:?} ({} records)", path, records.len());
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `next` to disk, then make it the visible state.
    async fn commit(
        &self,
        current: &mut Vec<ExerciseRecord>,
        next: Vec<ExerciseRecord>,
    ) -> Result<()> {
        let path = self.path.clone();
        let snapshot = next.clone();
        tokio::task::spawn_blocking(move || save_records(&path, &snapshot))
            .await
            .map_err(|e| Error::Persistence(format!("store write task failed: {}", e)))?
            .map_err(|e| Error::Persistence(format!("failed to write {:?}: {}", self.path, e)))?;

        *current = next;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn insert_one(&self, exercise: NewExercise) -> Result<ExerciseId> {
        let mut records = self.records.write().await;
        let id = ExerciseId::generate();

        let mut next = records.clone();
        next.push(exercise.into_record(id));
        self.commit(&mut records, next).await?;

        tracing::debug!("Inserted exercise {} into {:?}", id, self.path);
        Ok(id)
    }

    async fn find_one_by_id(&self, id: &ExerciseId) -> Result<Option<ExerciseRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == *id).cloned())
    }

    async fn find_many(&self, filter: &ExerciseFilter) -> Result<Vec<ExerciseRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn replace_one_by_id(&self, id: &ExerciseId, exercise: NewExercise) -> Result<u64> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id == *id) else {
            return Ok(0);
        };

        let mut next = records.clone();
        next[index] = exercise.into_record(*id);
        self.commit(&mut records, next).await?;
        Ok(1)
    }

    async fn delete_one_by_id(&self, id: &ExerciseId) -> Result<u64> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id == *id) else {
            return Ok(0);
        };

        let mut next = records.clone();
        next.remove(index);
        self.commit(&mut records, next).await?;
        Ok(1)
    }
}

/// Read all records with a shared lock held.
fn load_records(path: &Path) -> Result<Vec<ExerciseRecord>> {
    if !path.exists() {
        tracing::info!("No store file at {:?}, starting empty", path);
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;
    read?;

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).map_err(|e| {
        tracing::error!("Store file {:?} is corrupted: {}", path, e);
        Error::Persistence(format!("corrupted store file {:?}: {}", path, e))
    })
}

/// Atomically replace the store file:
/// 1. Write to a temp file in the same directory
/// 2. Sync to disk
/// 3. Rename over the original
fn save_records(path: &Path, records: &[ExerciseRecord]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        serde_json::to_writer(&mut writer, records)?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved {} records to {:?}", records.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExerciseDate, FieldValue, Unit};

    fn exercise(name: &str, unit: Unit) -> NewExercise {
        NewExercise::new(name, 5, 135.0, unit, ExerciseDate::parse("04-01-22").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("exercises.json"))
            .await
            .unwrap();

        let all = store.find_many(&ExerciseFilter::all()).await.unwrap();
        assert!(all.is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data").join("exercises.json");

        let (kept, replaced) = {
            let store = JsonFileStore::open(&path).await.unwrap();
            let kept = store.insert_one(exercise("squat", Unit::Lbs)).await.unwrap();
            let replaced = store.insert_one(exercise("bench", Unit::Lbs)).await.unwrap();
            let dropped = store.insert_one(exercise("curl", Unit::Kgs)).await.unwrap();

            store
                .replace_one_by_id(&replaced, exercise("incline bench", Unit::Kgs))
                .await
                .unwrap();
            store.delete_one_by_id(&dropped).await.unwrap();
            (kept, replaced)
        };

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let all = reopened.find_many(&ExerciseFilter::all()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, kept);
        assert_eq!(all[1].id, replaced);
        assert_eq!(all[1].name, "incline bench");
        assert_eq!(all[1].unit, Unit::Kgs);

        let kgs = reopened
            .find_many(&ExerciseFilter::all().with(FieldValue::Unit("kgs".into())))
            .await
            .unwrap();
        assert_eq!(kgs.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_does_not_touch_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exercises.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        let missing = ExerciseId::generate();
        assert_eq!(store.delete_one_by_id(&missing).await.unwrap(), 0);
        assert_eq!(
            store
                .replace_one_by_id(&missing, exercise("squat", Unit::Lbs))
                .await
                .unwrap(),
            0
        );
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupted_file_fails_to_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exercises.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let err = JsonFileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        // The damaged file is left for manual recovery.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ invalid json }");
    }

    #[tokio::test]
    async fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exercises.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        store.insert_one(exercise("squat", Unit::Lbs)).await.unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "exercises.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only exercises.json, found extras: {:?}",
            extras
        );
    }

    #[tokio::test]
    async fn test_reads_do_not_wait_on_other_readers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("exercises.json"))
            .await
            .unwrap();
        let id = store.insert_one(exercise("squat", Unit::Lbs)).await.unwrap();

        let _reader = store.records.read().await;
        let wait = std::time::Duration::from_secs(1);

        let found = tokio::time::timeout(wait, store.find_one_by_id(&id))
            .await
            .expect("lookup blocked behind a reader")
            .unwrap();
        assert!(found.is_some());

        let all = tokio::time::timeout(wait, store.find_many(&ExerciseFilter::all()))
            .await
            .expect("listing blocked behind a reader")
            .unwrap();
        assert_eq!(all.len(), 1);
    }
}
