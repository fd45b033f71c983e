//! `brushwise serve` — Start the HTTP API server.

use brushwise_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
        config.validate()?;
    }

    println!("🎨 Brushwise Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   Latency:   {}",
        if config.latency.enabled { "simulated" } else { "off" }
    );

    brushwise_gateway::start(config).await?;

    Ok(())
}
