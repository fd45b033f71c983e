//! `brushwise status` — Show system status.

use brushwise_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🎨 Brushwise Status");
    println!("===================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "  CORS:         {}",
        if config.gateway.cors_origins.is_empty() {
            "any origin".to_string()
        } else {
            config.gateway.cors_origins.join(", ")
        }
    );
    println!(
        "  Latency:      {}",
        if config.latency.enabled { "simulated" } else { "off" }
    );
    println!(
        "  Catalog:      {}",
        config.catalog.path.as_deref().unwrap_or("built-in")
    );

    match config.load_catalog() {
        Ok(catalog) => {
            let contexts: Vec<&str> = catalog.contexts().map(|(id, _)| id.as_str()).collect();
            println!("  Contexts:     {}", contexts.join(", "));
            println!("  Answers:      {}", catalog.entries().count());
        }
        Err(e) => println!("  Catalog:      ❌ {e}"),
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `brushwise onboard` first");
    }

    Ok(())
}
