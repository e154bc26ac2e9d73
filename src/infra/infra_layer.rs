// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "moderation/http_classifier.rs"]
pub mod moderation;

#[path = "community/mod.rs"]
pub mod community;

#[path = "appointments/in_memory.rs"]
pub mod appointments;

#[path = "medications/in_memory.rs"]
pub mod medications;

#[path = "profile/in_memory.rs"]
pub mod profile;
