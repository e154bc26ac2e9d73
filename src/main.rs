// Classifier connectivity diagnostic.
//
// Sends one deliberately provocative test prompt to the configured
// moderation endpoint and prints what came back, both raw and after
// normalization. Useful for checking that the classifier container is up
// and answering with the expected shape before the backend goes live.
//
// **Environment Variables:**
// - `CLASSIFIER_URL` - moderation endpoint (default: http://cmsai:8000/generate/)
// - `CLASSIFIER_TIMEOUT_MS` - production check budget in ms (default: 30000)
//
// The probe itself always uses a tighter 10-second budget.

use anyhow::Context;
use mindbridge::core::moderation::normalize;
use mindbridge::infra::moderation::{ClassifierConfig, HttpClassifier};
use std::time::Duration;

const DEFAULT_CLASSIFIER_URL: &str = "http://cmsai:8000/generate/";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const TEST_PROMPT: &str =
    "Everyone who disagrees with me is an idiot and should be banned from the internet!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let endpoint = std::env::var("CLASSIFIER_URL")
        .unwrap_or_else(|_| DEFAULT_CLASSIFIER_URL.to_string());
    let timeout_ms = std::env::var("CLASSIFIER_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);

    let classifier = HttpClassifier::new(ClassifierConfig {
        endpoint: endpoint.clone(),
        timeout: Duration::from_millis(timeout_ms),
    });

    println!("Attempting to connect to: {}", endpoint);

    let raw = classifier
        .probe(TEST_PROMPT)
        .await
        .context("Classifier probe failed")?;

    let safety = raw.safety.as_deref().unwrap_or("<missing>");
    let categories = raw.categories.clone().unwrap_or_default().join(", ");
    let verdict = normalize(&raw);

    println!("Connection successful and response parsed");
    println!("  Safety (API string): \"{}\"", safety);
    println!("  Categories (API array): [{}]", categories);
    println!(
        "  Normalized verdict: is_safe={} harm_category={}",
        verdict.is_safe, verdict.harm_category
    );

    Ok(())
}
