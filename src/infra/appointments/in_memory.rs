// In-memory implementation of AppointmentStore.

use crate::core::appointments::{
    Appointment, AppointmentError, AppointmentStore, AppointmentUpdate, NewAppointment,
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory appointment store backed by a concurrent map.
pub struct InMemoryAppointmentStore {
    appointments: DashMap<u64, Appointment>,
    next_id: AtomicU64,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self {
            appointments: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryAppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn create(&self, appointment: NewAppointment) -> Result<Appointment, AppointmentError> {
        let appointment = Appointment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: appointment.user_id,
            specialization: appointment.specialization,
            date: appointment.date,
            time: appointment.time,
            reminders: appointment.reminders,
            notes: appointment.notes,
            notification_ids: appointment.notification_ids,
            created_at: Utc::now(),
        };
        self.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn find(&self, id: u64) -> Result<Option<Appointment>, AppointmentError> {
        Ok(self.appointments.get(&id).map(|entry| entry.clone()))
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        let mut appointments: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();

        appointments.sort_by(|a, b| a.date.cmp(&b.date).then(a.time.cmp(&b.time)));
        Ok(appointments)
    }

    async fn update(
        &self,
        id: u64,
        update: AppointmentUpdate,
    ) -> Result<Option<Appointment>, AppointmentError> {
        match self.appointments.get_mut(&id) {
            Some(mut appointment) => {
                if let Some(specialization) = update.specialization {
                    appointment.specialization = specialization;
                }
                if let Some(date) = update.date {
                    appointment.date = date;
                }
                if let Some(time) = update.time {
                    appointment.time = time;
                }
                if let Some(reminders) = update.reminders {
                    appointment.reminders = reminders;
                }
                if let Some(notes) = update.notes {
                    appointment.notes = notes;
                }
                if let Some(notification_ids) = update.notification_ids {
                    appointment.notification_ids = notification_ids;
                }
                Ok(Some(appointment.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: u64) -> Result<(), AppointmentError> {
        self.appointments.remove(&id);
        Ok(())
    }
}
