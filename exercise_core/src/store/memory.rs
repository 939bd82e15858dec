//! Process-local store keeping records in insertion order.

use super::RecordStore;
use crate::{ExerciseFilter, ExerciseId, ExerciseRecord, NewExercise, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory record store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<ExerciseRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert_one(&self, exercise: NewExercise) -> Result<ExerciseId> {
        let id = ExerciseId::generate();
        self.records.write().await.push(exercise.into_record(id));
        tracing::debug!("Inserted exercise {}", id);
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
        match records.iter_mut().find(|r| r.id == *id) {
            Some(slot) => {
                *slot = exercise.into_record(*id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one_by_id(&self, id: &ExerciseId) -> Result<u64> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.id == *id) {
            Some(index) => {
                records.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
