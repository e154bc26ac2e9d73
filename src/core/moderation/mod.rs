// Core moderation module - the content-safety gate for community submissions.

pub mod moderation_models;
pub mod moderation_service;

pub use moderation_models::*;
pub use moderation_service::*;
