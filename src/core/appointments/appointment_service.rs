// Appointments - scheduling CRUD for a patient's care visits.
//
// Pure domain logic over the store trait; reminder delivery and push
// notifications belong to the clients, we only keep their identifiers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Missing required appointment fields")]
    MissingFields,

    #[error("Appointment not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

// ============================================================================
// MODELS
// ============================================================================

/// A scheduled appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u64,
    pub user_id: String,
    pub specialization: String,
    /// Calendar date as the client sends it, e.g. "2025-03-14".
    pub date: String,
    /// Wall-clock time as the client sends it, e.g. "08:00 AM".
    pub time: String,
    pub reminders: Vec<String>,
    pub notes: String,
    /// Client-side notification ids so reminders can be cancelled on update.
    pub notification_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating an appointment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub user_id: String,
    pub specialization: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub reminders: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub notification_ids: Vec<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub specialization: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reminders: Option<Vec<String>>,
    pub notes: Option<String>,
    pub notification_ids: Option<Vec<String>>,
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for persisting appointments.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create(&self, appointment: NewAppointment) -> Result<Appointment, AppointmentError>;

    async fn find(&self, id: u64) -> Result<Option<Appointment>, AppointmentError>;

    /// Appointments for one user, sorted by date then time ascending.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Appointment>, AppointmentError>;

    /// Apply a partial update; `None` when the appointment does not exist.
    async fn update(
        &self,
        id: u64,
        update: AppointmentUpdate,
    ) -> Result<Option<Appointment>, AppointmentError>;

    /// Delete by id. Deleting a missing appointment is not an error.
    async fn delete(&self, id: u64) -> Result<(), AppointmentError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct AppointmentService<S: AppointmentStore> {
    store: S,
}

impl<S: AppointmentStore> AppointmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an appointment after checking the required fields.
    pub async fn create(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentError> {
        if appointment.user_id.is_empty()
            || appointment.specialization.is_empty()
            || appointment.date.is_empty()
            || appointment.time.is_empty()
        {
            return Err(AppointmentError::MissingFields);
        }

        let created = self.store.create(appointment).await?;
        tracing::info!(id = created.id, user_id = %created.user_id, "Appointment created");
        Ok(created)
    }

    pub async fn get(&self, id: u64) -> Result<Appointment, AppointmentError> {
        self.store.find(id).await?.ok_or(AppointmentError::NotFound)
    }

    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.store.list_for_user(user_id).await
    }

    pub async fn update(
        &self,
        id: u64,
        update: AppointmentUpdate,
    ) -> Result<Appointment, AppointmentError> {
        self.store
            .update(id, update)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppointmentError> {
        self.store.delete(id).await
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::appointments::InMemoryAppointmentStore;

    fn new_appointment(user_id: &str, date: &str, time: &str) -> NewAppointment {
        NewAppointment {
            user_id: user_id.to_string(),
            specialization: "Psychiatry".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            reminders: vec!["1h".to_string()],
            notes: String::new(),
            notification_ids: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = AppointmentService::new(InMemoryAppointmentStore::new());

        let created = service
            .create(new_appointment("user-1", "2025-03-14", "08:00 AM"))
            .await
            .unwrap();

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let service = AppointmentService::new(InMemoryAppointmentStore::new());

        let mut appointment = new_appointment("user-1", "2025-03-14", "08:00 AM");
        appointment.specialization = String::new();

        let err = service.create(appointment).await.unwrap_err();
        assert!(matches!(err, AppointmentError::MissingFields));
    }

    #[tokio::test]
    async fn test_list_sorted_by_date_then_time() {
        let service = AppointmentService::new(InMemoryAppointmentStore::new());

        service
            .create(new_appointment("user-1", "2025-03-15", "09:00 AM"))
            .await
            .unwrap();
        service
            .create(new_appointment("user-1", "2025-03-14", "11:00 AM"))
            .await
            .unwrap();
        service
            .create(new_appointment("user-1", "2025-03-14", "08:00 AM"))
            .await
            .unwrap();
        service
            .create(new_appointment("someone-else", "2025-01-01", "08:00 AM"))
            .await
            .unwrap();

        let appointments = service.list_for_user("user-1").await.unwrap();

        assert_eq!(appointments.len(), 3);
        assert_eq!(appointments[0].date, "2025-03-14");
        assert_eq!(appointments[0].time, "08:00 AM");
        assert_eq!(appointments[1].time, "11:00 AM");
        assert_eq!(appointments[2].date, "2025-03-15");
    }

    #[tokio::test]
    async fn test_update_changes_only_provided_fields() {
        let service = AppointmentService::new(InMemoryAppointmentStore::new());

        let created = service
            .create(new_appointment("user-1", "2025-03-14", "08:00 AM"))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                AppointmentUpdate {
                    time: Some("10:30 AM".to_string()),
                    notes: Some("Bring referral letter".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.time, "10:30 AM");
        assert_eq!(updated.notes, "Bring referral letter");
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.specialization, created.specialization);
    }

    #[tokio::test]
    async fn test_update_missing_appointment() {
        let service = AppointmentService::new(InMemoryAppointmentStore::new());

        let err = service
            .update(42, AppointmentUpdate::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppointmentError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let service = AppointmentService::new(InMemoryAppointmentStore::new());

        let created = service
            .create(new_appointment("user-1", "2025-03-14", "08:00 AM"))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();
        // Deleting again is fine.
        service.delete(created.id).await.unwrap();

        let err = service.get(created.id).await.unwrap_err();
        assert!(matches!(err, AppointmentError::NotFound));
    }
}
