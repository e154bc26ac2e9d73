// Community board service - moderated post and reply submission.
//
// Both submission flows share the same shape: validate presence of the
// required fields, consult the moderation gate, and only persist on a
// safe verdict. The service never needs to know why moderation failed -
// the gate folds every classifier failure into an unsafe verdict.

use super::community_models::{CommunityError, NewEntry, Post, SubmissionOutcome};
use crate::core::moderation::{ClassifierProvider, ModerationService};
use async_trait::async_trait;

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for persisting posts and replies.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new top-level post and return it with its assigned id.
    async fn create_post(&self, entry: NewEntry) -> Result<Post, CommunityError>;

    /// Look up a post by id.
    async fn find_post(&self, post_id: u64) -> Result<Option<Post>, CommunityError>;

    /// Append a reply to the given post and return the updated post, or
    /// `None` when the post does not exist.
    ///
    /// The append must be atomic: concurrent replies to the same post must
    /// each land without clobbering one another, so implementations may not
    /// use read-modify-write on the whole post.
    async fn append_reply(
        &self,
        post_id: u64,
        reply: NewEntry,
    ) -> Result<Option<Post>, CommunityError>;

    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, CommunityError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Community board service over a post store and a moderation gate.
pub struct CommunityService<S: PostStore, C: ClassifierProvider> {
    store: S,
    moderation: ModerationService<C>,
}

impl<S: PostStore, C: ClassifierProvider> CommunityService<S, C> {
    /// Create a new community service with the given store and gate.
    pub fn new(store: S, moderation: ModerationService<C>) -> Self {
        Self { store, moderation }
    }

    /// Create a new top-level post.
    ///
    /// Validation strictly precedes moderation: a request missing the
    /// required fields never reaches the classifier.
    pub async fn create_post(
        &self,
        user_name: &str,
        message: &str,
    ) -> Result<SubmissionOutcome, CommunityError> {
        if user_name.is_empty() || message.is_empty() {
            return Err(CommunityError::MissingFields);
        }

        let verdict = self.moderation.check_content(message).await;
        if !verdict.is_safe {
            tracing::warn!(
                harm_category = %verdict.harm_category,
                reasoning = %verdict.reasoning,
                "Post blocked"
            );
            return Ok(SubmissionOutcome::blocked(verdict.harm_category));
        }

        let post = self
            .store
            .create_post(NewEntry {
                user_name: user_name.to_string(),
                message: message.to_string(),
            })
            .await?;

        Ok(SubmissionOutcome::Posted(post))
    }

    /// Append a reply to an existing post.
    ///
    /// Moderation runs before the parent-existence lookup, so the
    /// classifier cost is paid even when the target post turns out not to
    /// exist. This matches the long-standing behavior the client tests
    /// assert against.
    pub async fn reply_to_post(
        &self,
        post_id: u64,
        user_name: &str,
        message: &str,
    ) -> Result<SubmissionOutcome, CommunityError> {
        if user_name.is_empty() || message.is_empty() {
            return Err(CommunityError::MissingFields);
        }

        let verdict = self.moderation.check_content(message).await;
        if !verdict.is_safe {
            tracing::warn!(
                post_id,
                harm_category = %verdict.harm_category,
                reasoning = %verdict.reasoning,
                "Reply blocked"
            );
            return Ok(SubmissionOutcome::blocked(verdict.harm_category));
        }

        let updated = self
            .store
            .append_reply(
                post_id,
                NewEntry {
                    user_name: user_name.to_string(),
                    message: message.to_string(),
                },
            )
            .await?
            .ok_or(CommunityError::PostNotFound)?;

        Ok(SubmissionOutcome::Posted(updated))
    }

    /// All posts, newest first. No moderation involved on the read path.
    pub async fn list_posts(&self) -> Result<Vec<Post>, CommunityError> {
        self.store.list_posts().await
    }
}

// ============================================================================
// TESTS
// ============================================================================
