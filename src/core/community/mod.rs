// Core community module - the moderated post/reply board.
// Following the same pattern as the moderation module.

pub mod community_models;
pub mod community_service;

pub use community_models::*;
pub use community_service::*;
