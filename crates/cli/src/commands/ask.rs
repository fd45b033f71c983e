//! `brushwise ask` — Resolve one question and print the answer.

use std::sync::Arc;

use brushwise_config::AppConfig;
use brushwise_core::Resolver;

pub async fn run(
    context: Option<String>,
    simulate_latency: bool,
    query: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let resolver = Resolver::new(Arc::new(config.load_catalog()?));

    let resolution = resolver.resolve(context.as_deref(), &query);
    tracing::debug!(scope = resolution.scope, topic = resolution.topic, "Resolved");

    if simulate_latency {
        eprint!("  Thinking...");
        tokio::time::sleep(config.latency.delay(config.latency.learning_assistant_ms)).await;
        eprint!("\r              \r");
    }

    println!("{}", resolution.body);
    Ok(())
}
