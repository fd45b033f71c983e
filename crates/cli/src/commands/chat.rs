//! `brushwise chat` — Interactive assistant chat.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use brushwise_config::AppConfig;
use brushwise_core::{ChatMessage, Resolver, Transcript};

pub async fn run(context: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let resolver = Resolver::new(Arc::new(config.load_catalog()?));

    let mut transcript = Transcript::new(context.clone());

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        Brushwise Assistant — Chat Mode       ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Context:   {}", context.as_deref().unwrap_or("none"));
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    if context.is_some() {
        let greeting = resolver.greeting(context.as_deref());
        println!("  Assistant > {}", greeting.body);
        println!();
        transcript.push(ChatMessage::assistant(greeting.body));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }

        transcript.push(ChatMessage::user(input));
        let resolution = resolver.resolve(context.as_deref(), input);
        tracing::debug!(scope = resolution.scope, topic = resolution.topic, "Resolved");

        eprint!("  ...");
        tokio::time::sleep(config.latency.delay(config.latency.learning_assistant_ms)).await;
        eprint!("\r     \r");

        println!("  Assistant > {}", resolution.body);
        println!();
        transcript.push(ChatMessage::assistant(resolution.body));
    }

    println!();
    println!(
        "  👋 Goodbye! ({} questions asked)",
        transcript.user_turns()
    );
    Ok(())
}
