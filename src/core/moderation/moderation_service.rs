// Content moderation service - the safety gate for community submissions.
//
// This is the single entry point the content-creation flows consult before
// persisting anything. It wraps a classifier provider and always resolves
// to a Verdict: any failure of the classifier (timeout, network, malformed
// response, error status) fails closed and blocks the content.
//
// NO HTTP dependencies here - just pure domain logic over the provider trait.

use super::moderation_models::{
    ClassifierError, RawClassification, Verdict, CATEGORY_UNSPECIFIED_HARM,
};
use async_trait::async_trait;

// ============================================================================
// CLASSIFIER TRAIT (PORT)
// ============================================================================

/// Trait for the external text-classification service.
///
/// Following the same pattern as the store traits: core defines the
/// contract, infra supplies the HTTP implementation, tests supply mocks.
#[async_trait]
pub trait ClassifierProvider: Send + Sync {
    /// Classify one piece of text. Called once per submission - verdicts
    /// are never cached or reused, even for identical text.
    async fn classify(&self, content: &str) -> Result<RawClassification, ClassifierError>;
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Convert the classifier's loosely-typed response into a strict [`Verdict`].
///
/// Pure and infallible: ambiguity always resolves toward "unsafe". The
/// safety string is compared case-insensitively against the literal
/// "safe"; anything else (including a missing field) blocks the content.
pub fn normalize(raw: &RawClassification) -> Verdict {
    let is_safe = raw
        .safety
        .as_deref()
        .map(|s| s.to_lowercase() == "safe")
        .unwrap_or(false);

    if is_safe {
        return Verdict::safe();
    }

    let harm_category = raw
        .categories
        .as_deref()
        .and_then(|categories| categories.first())
        .map(|label| canonical_category(label))
        .unwrap_or_else(|| CATEGORY_UNSPECIFIED_HARM.to_string());

    Verdict::flagged(harm_category)
}

/// Uppercase a category label and replace each whitespace character with
/// an underscore, e.g. "hate speech" -> "HATE_SPEECH".
fn canonical_category(label: &str) -> String {
    label
        .to_uppercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Moderation gate over a classifier provider.
pub struct ModerationService<C: ClassifierProvider> {
    classifier: C,
}

impl<C: ClassifierProvider> ModerationService<C> {
    /// Create a new moderation service with the given classifier.
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Check whether the given text is safe to publish.
    ///
    /// Never returns an error: every failure path terminates in a
    /// fail-closed verdict, so callers only ever branch on `is_safe`.
    pub async fn check_content(&self, content: &str) -> Verdict {
        // Empty content is blocked without paying for a classifier call.
        if content.trim().is_empty() {
            return Verdict::empty_content();
        }

        match self.classifier.classify(content).await {
            Ok(raw) => normalize(&raw),
            Err(ClassifierError::Timeout) => {
                tracing::error!("Moderation check timed out, blocking content");
                Verdict::policy_blocked("Moderation API timed out. Blocked for safety.")
            }
            Err(ClassifierError::Network(cause)) => {
                tracing::error!(%cause, "Moderation API unreachable, blocking content");
                Verdict::policy_blocked("Moderation API unreachable. Blocked for safety.")
            }
            Err(ClassifierError::MalformedResponse { raw }) => {
                tracing::error!(body = %raw, "Invalid moderation API response, blocking content");
                Verdict::policy_blocked("Invalid response from moderation API. Blocked for safety.")
            }
            Err(ClassifierError::Api { status, body }) => {
                tracing::error!(status, %body, "Moderation API error status, blocking content");
                Verdict::policy_blocked(format!("API request failed with status {}", status))
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
