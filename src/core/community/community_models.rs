// Community board domain models - posts and their replies.
//
// Serialized field names match the JSON the mobile app already speaks
// (userName, createdAt, blockedReason).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Guidance text returned to the caller when moderation blocks a submission.
pub const BLOCKED_GUIDANCE: &str =
    "Content was flagged as unsafe. Please revise your post according to community guidelines.";

/// A reply attached to a post. Replies are append-only and never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub user_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A top-level community post owning an ordered sequence of replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_name: String,
    pub message: String,
    pub replies: Vec<Reply>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted from the caller when creating a post or a reply.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub user_name: String,
    pub message: String,
}

/// Outcome of a moderated submission.
///
/// Blocking is a policy decision, not a system error, so it lives here
/// rather than in [`CommunityError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmissionOutcome {
    /// Moderation passed and the entity was persisted.
    Posted(Post),
    /// Moderation blocked the submission; nothing was persisted.
    #[serde(rename_all = "camelCase")]
    Blocked {
        message: String,
        blocked_reason: String,
    },
}

impl SubmissionOutcome {
    /// Build the blocked response for the given harm category.
    pub fn blocked(harm_category: String) -> Self {
        Self::Blocked {
            message: BLOCKED_GUIDANCE.to_string(),
            blocked_reason: harm_category,
        }
    }
}

/// Errors from the community board flows.
#[derive(Debug, Error)]
pub enum CommunityError {
    #[error("Missing userName or message")]
    MissingFields,

    #[error("Post not found")]
    PostNotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}
