//! Exercise service: the validation gate in front of the record store.
//!
//! Create and replace always run the candidate through validation, so no
//! caller can persist a record that breaks a field rule. External identifiers
//! are parsed here as well; the store only ever sees well-formed ids.

use crate::store::RecordStore;
use crate::{ExerciseCandidate, ExerciseFilter, ExerciseId, ExerciseRecord, Result};
use std::sync::Arc;

/// Business layer over an injected record store
#[derive(Clone)]
pub struct ExerciseService {
    store: Arc<dyn RecordStore>,
}

impl ExerciseService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new exercise, returning it with its assigned id.
    pub async fn create_exercise(&self, candidate: &ExerciseCandidate) -> Result<ExerciseRecord> {
        let exercise = candidate.parse().map_err(|e| {
            tracing::warn!("Rejected new exercise: {}", e);
            e
        })?;

        let id = self.store.insert_one(exercise.clone()).await.map_err(|e| {
            tracing::error!("Failed to insert exercise: {}", e);
            e
        })?;

        tracing::info!("Created exercise {} ({})", id, exercise.name());
        Ok(exercise.into_record(id))
    }

    /// Look up a single exercise.
    ///
    /// Returns `Ok(None)` for a well-formed id with no record, and
    /// `InvalidIdentifier` for an id the store could never have issued.
    pub async fn find_exercise_by_id(&self, id: &str) -> Result<Option<ExerciseRecord>> {
        let id = ExerciseId::parse(id)?;
        let found = self.store.find_one_by_id(&id).await?;
        if found.is_none() {
            tracing::debug!("No exercise with id {}", id);
        }
        Ok(found)
    }

    pub async fn find_exercises(&self, filter: &ExerciseFilter) -> Result<Vec<ExerciseRecord>> {
        let records = self.store.find_many(filter).await?;
        tracing::debug!("Found {} exercises for {:?}", records.len(), filter);
        Ok(records)
    }

    /// Overwrite every field of an existing exercise.
    ///
    /// Returns the number of records updated: 1, or 0 when nothing has that id.
    pub async fn replace_exercise(&self, id: &str, candidate: &ExerciseCandidate) -> Result<u64> {
        let exercise = candidate.parse().map_err(|e| {
            tracing::warn!("Rejected replacement for {}: {}", id, e);
            e
        })?;
        let id = ExerciseId::parse(id)?;

        let updated = self.store.replace_one_by_id(&id, exercise).await?;
        tracing::info!("Replaced exercise {} (matched {})", id, updated);
        Ok(updated)
    }

    /// Returns the number of records deleted: 1, or 0 when nothing has that id.
    pub async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let id = ExerciseId::parse(id)?;
        let deleted = self.store.delete_one_by_id(&id).await?;
        tracing::info!("Deleted exercise {} (matched {})", id, deleted);
        Ok(deleted)
    }
}
