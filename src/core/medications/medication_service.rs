// Medications - CRUD for a patient's medication schedule.
//
// Same shape as the appointments feature: typed models, a store trait,
// and a thin service that owns validation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum MedicationError {
    #[error("Missing required medication fields")]
    MissingFields,

    #[error("Medication not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

// ============================================================================
// MODELS
// ============================================================================

/// One medication on a patient's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: u64,
    pub user_id: String,
    pub drug_name: String,
    pub dosage: String,
    /// Form of the medication, e.g. "tablet" or "injection".
    /// Serialized as "type" to match the client payloads.
    #[serde(rename = "type")]
    pub kind: String,
    /// Intake times, e.g. ["08:00 AM", "08:00 PM"].
    pub times: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when adding a medication.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedication {
    pub user_id: String,
    pub drug_name: String,
    pub dosage: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub times: Vec<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationUpdate {
    pub drug_name: Option<String>,
    pub dosage: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub times: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for persisting medications.
#[async_trait]
pub trait MedicationStore: Send + Sync {
    async fn create(&self, medication: NewMedication) -> Result<Medication, MedicationError>;

    /// Medications for one user, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Medication>, MedicationError>;

    /// Apply a partial update; `None` when the medication does not exist.
    async fn update(
        &self,
        id: u64,
        update: MedicationUpdate,
    ) -> Result<Option<Medication>, MedicationError>;

    /// Delete by id. Deleting a missing medication is not an error.
    async fn delete(&self, id: u64) -> Result<(), MedicationError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct MedicationService<S: MedicationStore> {
    store: S,
}

impl<S: MedicationStore> MedicationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Add a medication after checking the required fields.
    pub async fn add(&self, medication: NewMedication) -> Result<Medication, MedicationError> {
        if medication.user_id.is_empty()
            || medication.drug_name.is_empty()
            || medication.dosage.is_empty()
            || medication.kind.is_empty()
            || medication.times.is_empty()
        {
            return Err(MedicationError::MissingFields);
        }

        let created = self.store.create(medication).await?;
        tracing::info!(id = created.id, user_id = %created.user_id, "Medication saved");
        Ok(created)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Medication>, MedicationError> {
        self.store.list_for_user(user_id).await
    }

    pub async fn update(
        &self,
        id: u64,
        update: MedicationUpdate,
    ) -> Result<Medication, MedicationError> {
        self.store
            .update(id, update)
            .await?
            .ok_or(MedicationError::NotFound)
    }

    pub async fn delete(&self, id: u64) -> Result<(), MedicationError> {
        self.store.delete(id).await
    }
}

// ============================================================================
// TESTS
// ============================================================================
