// Moderation domain models - the safety verdict produced for user content.
//
// These are pure domain types with no HTTP dependencies.
// The infra layer converts the classifier's wire format into these.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Harm category reported when content is allowed.
pub const CATEGORY_NONE: &str = "NONE";

/// Category used for empty or whitespace-only submissions.
pub const CATEGORY_OFF_TOPIC_SPAM: &str = "OFF_TOPIC_SPAM";

/// Fail-closed category used when the classifier could not be consulted
/// (timeout, network failure, malformed response, error status). Signals
/// "blocked by policy", not an actually detected category.
pub const CATEGORY_DANGEROUS_CONTENT: &str = "DANGEROUS_CONTENT";

/// Category used when the classifier flagged content but reported no
/// usable category list.
pub const CATEGORY_UNSPECIFIED_HARM: &str = "UNSPECIFIED_HARM";

// ============================================================================
// ERRORS
// ============================================================================

/// Failures the classifier client can surface.
///
/// None of these ever reach the submission flow - the moderation service
/// converts every variant into a fail-closed [`Verdict`].
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier request timed out")]
    Timeout,

    #[error("Classifier unreachable: {0}")]
    Network(String),

    /// The response body was not the JSON shape we expect.
    /// Carries a truncated prefix of the raw body for diagnostics.
    #[error("Invalid classifier response: {raw}")]
    MalformedResponse { raw: String },

    /// The classifier answered with a non-success HTTP status.
    #[error("Classifier returned status {status}")]
    Api { status: u16, body: String },
}

// ============================================================================
// WIRE TYPES
// ============================================================================

/// The classifier's success body after a strict serde parse.
///
/// Only two fields are load-bearing: `safety` (string, "Safe" when the
/// content is allowed) and `categories` (list of harm labels). Absent
/// fields deserialize to `None` and are resolved by the normalizer; a
/// field with the wrong type fails the parse entirely and surfaces as
/// [`ClassifierError::MalformedResponse`] in the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub safety: Option<String>,

    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

// ============================================================================
// VERDICT
// ============================================================================

/// The normalized safe/unsafe decision for one piece of submitted text.
///
/// Invariant: `harm_category == "NONE"` exactly when `is_safe` is true.
/// The reasoning string is human-readable and non-normative - callers
/// decide on `is_safe` and `harm_category` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_safe: bool,
    pub reasoning: String,
    pub harm_category: String,
}

impl Verdict {
    /// Content passed moderation.
    pub fn safe() -> Self {
        Self {
            is_safe: true,
            reasoning: "Content passed local moderation.".to_string(),
            harm_category: CATEGORY_NONE.to_string(),
        }
    }

    /// Empty or whitespace-only content. No classifier call is made for this.
    pub fn empty_content() -> Self {
        Self {
            is_safe: false,
            reasoning: "Content is empty.".to_string(),
            harm_category: CATEGORY_OFF_TOPIC_SPAM.to_string(),
        }
    }

    /// The classifier flagged the content with the given category.
    pub fn flagged(harm_category: String) -> Self {
        Self {
            is_safe: false,
            reasoning: "Content flagged by LLM.".to_string(),
            harm_category,
        }
    }

    /// The check itself failed, so the content is blocked as a policy
    /// decision rather than because of a detected category.
    pub fn policy_blocked(reasoning: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            reasoning: reasoning.into(),
            harm_category: CATEGORY_DANGEROUS_CONTENT.to_string(),
        }
    }
}
