// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "community/mod.rs"]
pub mod community;

#[path = "appointments/appointment_service.rs"]
pub mod appointments;

#[path = "medications/medication_service.rs"]
pub mod medications;

#[path = "profile/profile_service.rs"]
pub mod profile;
