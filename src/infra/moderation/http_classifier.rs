// HTTP classifier client - talks to the local text-classification service.
//
// This is the infra-side implementation of `ClassifierProvider`. One POST
// per check, a hard per-request timeout that aborts the in-flight call,
// and no retries: every failure is surfaced immediately as a typed
// `ClassifierError` for the moderation gate to fold into a verdict.
//
// The response body is always read as text before parsing so a malformed
// payload can still be logged and diagnosed.

use crate::core::moderation::{ClassifierError, ClassifierProvider, RawClassification};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// How much of a raw response body we keep for diagnostics.
const RAW_BODY_SNIPPET_LEN: usize = 2000;

/// Budget for the connectivity probe, deliberately tighter than the
/// production check so a wedged classifier is reported quickly.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the classifier lives and how long one check may take.
///
/// Injected at construction - there is no implicit global endpoint.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

/// The request body the classifier expects.
#[derive(Serialize)]
struct ClassifyRequest<'a> {
    prompt: &'a str,
}

/// Classifier client over reqwest.
pub struct HttpClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl HttpClassifier {
    /// Create a new client for the given endpoint and timeout.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Connectivity probe used by the diagnostic binary. Same request
    /// shape as a production check but with the fixed 10-second budget.
    pub async fn probe(&self, prompt: &str) -> Result<RawClassification, ClassifierError> {
        self.request(prompt, PROBE_TIMEOUT).await
    }

    async fn request(
        &self,
        content: &str,
        timeout: Duration,
    ) -> Result<RawClassification, ClassifierError> {
        tracing::debug!(endpoint = %self.config.endpoint, "Sending classification request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .timeout(timeout)
            .json(&ClassifyRequest { prompt: content })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        // Read the full body as text first so malformed JSON can still be
        // logged. The timeout covers this read as well.
        let raw = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %snippet(&raw),
                "Classifier returned error status"
            );
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                body: snippet(&raw),
            });
        }

        serde_json::from_str(&raw).map_err(|err| {
            tracing::error!(
                error = %err,
                body = %snippet(&raw),
                "Failed to parse classifier response"
            );
            ClassifierError::MalformedResponse { raw: snippet(&raw) }
        })
    }
}

#[async_trait]
impl ClassifierProvider for HttpClassifier {
    async fn classify(&self, content: &str) -> Result<RawClassification, ClassifierError> {
        self.request(content, self.config.timeout).await
    }
}

fn map_transport_error(err: reqwest::Error) -> ClassifierError {
    if err.is_timeout() {
        ClassifierError::Timeout
    } else {
        ClassifierError::Network(err.to_string())
    }
}

/// Truncate a raw body to a loggable prefix without splitting a char.
fn snippet(raw: &str) -> String {
    let mut end = RAW_BODY_SNIPPET_LEN.min(raw.len());
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    raw[..end].to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Instant;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn classifier_for(server: &MockServer, timeout: Duration) -> HttpClassifier {
        HttpClassifier::new(ClassifierConfig {
            endpoint: format!("{}/generate/", server.uri()),
            timeout,
        })
    }

    #[tokio::test]
    async fn test_safe_response_parses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate/"))
            .and(body_json(json!({ "prompt": "Hello world!" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "safety": "Safe", "categories": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let classifier = classifier_for(&server, Duration::from_secs(5));
        let raw = classifier.classify("Hello world!").await.unwrap();

        assert_eq!(raw.safety.as_deref(), Some("Safe"));
        assert_eq!(raw.categories, Some(vec![]));
    }

    #[tokio::test]
    async fn test_flagged_response_parses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "safety": "Unsafe",
                "categories": ["hate speech", "harassment"],
            })))
            .mount(&server)
            .await;

        let classifier = classifier_for(&server, Duration::from_secs(5));
        let raw = classifier.classify("hostile text").await.unwrap();

        assert_eq!(raw.safety.as_deref(), Some("Unsafe"));
        assert_eq!(
            raw.categories,
            Some(vec!["hate speech".to_string(), "harassment".to_string()])
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let classifier = classifier_for(&server, Duration::from_secs(5));
        let err = classifier.classify("anything").await.unwrap_err();

        match err {
            ClassifierError::MalformedResponse { raw } => assert!(raw.contains("oops")),
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "safety": 1, "categories": "none" })),
            )
            .mount(&server)
            .await;

        let classifier = classifier_for(&server, Duration::from_secs(5));
        let err = classifier.classify("anything").await.unwrap_err();

        assert!(matches!(err, ClassifierError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503).set_body_string("{\"detail\":\"overloaded\"}"),
            )
            .mount(&server)
            .await;

        let classifier = classifier_for(&server, Duration::from_secs(5));
        let err = classifier.classify("anything").await.unwrap_err();

        match err {
            ClassifierError::Api { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("overloaded"));
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_classifier_times_out_within_budget() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "safety": "Safe", "categories": [] }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let classifier = classifier_for(&server, Duration::from_millis(100));
        let started = Instant::now();
        let err = classifier.classify("anything").await.unwrap_err();

        assert!(matches!(err, ClassifierError::Timeout));
        // Resolves shortly after the timeout fires, not after the delay.
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let classifier = HttpClassifier::new(ClassifierConfig {
            // Port 9 (discard) is never serving HTTP locally.
            endpoint: "http://127.0.0.1:9/generate/".to_string(),
            timeout: Duration::from_secs(1),
        });

        let err = classifier.classify("anything").await.unwrap_err();

        assert!(matches!(
            err,
            ClassifierError::Network(_) | ClassifierError::Timeout
        ));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let long = "é".repeat(RAW_BODY_SNIPPET_LEN);
        let cut = snippet(&long);
        assert!(cut.len() <= RAW_BODY_SNIPPET_LEN);
        assert!(cut.chars().all(|c| c == 'é'));
    }
}
