// In-memory implementation of MedicationStore.

use crate::core::medications::{
    Medication, MedicationError, MedicationStore, MedicationUpdate, NewMedication,
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory medication store backed by a concurrent map.
pub struct InMemoryMedicationStore {
    medications: DashMap<u64, Medication>,
    next_id: AtomicU64,
}

impl InMemoryMedicationStore {
    pub fn new() -> Self {
        Self {
            medications: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryMedicationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MedicationStore for InMemoryMedicationStore {
    async fn create(&self, medication: NewMedication) -> Result<Medication, MedicationError> {
        let medication = Medication {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: medication.user_id,
            drug_name: medication.drug_name,
            dosage: medication.dosage,
            kind: medication.kind,
            times: medication.times,
            start_date: medication.start_date,
            end_date: medication.end_date,
            notes: medication.notes,
            created_at: Utc::now(),
        };
        self.medications.insert(medication.id, medication.clone());
        Ok(medication)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Medication>, MedicationError> {
        let mut medications: Vec<Medication> = self
            .medications
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();

        // Newest first; ids break ties for entries created in the same instant.
        medications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(medications)
    }

    async fn update(
        &self,
        id: u64,
        update: MedicationUpdate,
    ) -> Result<Option<Medication>, MedicationError> {
        match self.medications.get_mut(&id) {
            Some(mut medication) => {
                if let Some(drug_name) = update.drug_name {
                    medication.drug_name = drug_name;
                }
                if let Some(dosage) = update.dosage {
                    medication.dosage = dosage;
                }
                if let Some(kind) = update.kind {
                    medication.kind = kind;
                }
                if let Some(times) = update.times {
                    medication.times = times;
                }
                if let Some(start_date) = update.start_date {
                    medication.start_date = Some(start_date);
                }
                if let Some(end_date) = update.end_date {
                    medication.end_date = Some(end_date);
                }
                if let Some(notes) = update.notes {
                    medication.notes = Some(notes);
                }
                Ok(Some(medication.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: u64) -> Result<(), MedicationError> {
        self.medications.remove(&id);
        Ok(())
    }
}
