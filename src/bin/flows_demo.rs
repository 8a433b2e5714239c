//! Runs the chain and routing patterns against a local Ollama instance.
//!
//! Usage: `cargo run --bin flows_demo` (expects Ollama on its default port;
//! override the model with `FLOWS_MODEL`).

use std::collections::BTreeMap;
use std::sync::Arc;

use agentic_flows::config::ProviderSettings;
use agentic_flows::provider::OllamaProvider;
use agentic_flows::telemetry;
use agentic_flows::workflows::{Chain, Router};

const SAMPLE_REPORT: &str = "\
Q3 Performance Summary:
Our customer satisfaction score rose to 92 points this quarter.
Revenue grew by 45% compared to last year.
Market share is now at 23% in our primary market.
Customer churn dropped to 5% from 8%.
New user acquisition cost is $43 per user.
Product adoption rate increased to 78%.
Employee satisfaction is at 87 points.
Operating margin improved to 34%.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let settings = ProviderSettings::from_env();
    let provider = Arc::new(OllamaProvider::new(ollama_rs::Ollama::default()));

    let chain = Chain::new(provider.clone()).with_model(&settings.model);
    let report = chain.chain(SAMPLE_REPORT).await?;
    println!("=== CHAIN OUTPUT ===\n{report}\n");

    let mut routes = BTreeMap::new();
    routes.insert(
        "billing".to_string(),
        "You are a billing support specialist. Resolve the customer's payment issue.".to_string(),
    );
    routes.insert(
        "technical".to_string(),
        "You are a technical support engineer. Diagnose and resolve the reported problem.".to_string(),
    );

    let router = Router::new(provider).with_model(&settings.model);
    let answer = router
        .route("I was charged twice for my subscription this month.", &routes)
        .await?;
    println!("=== ROUTED ANSWER ===\n{answer}");

    Ok(())
}
