//! `brushwise config` — Configuration management commands.

use brushwise_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    };
    println!("   ✅ Config parsed successfully");

    match config.load_catalog() {
        Ok(catalog) => {
            println!("   ✅ Catalog loaded ({} contexts)", catalog.contexts().count());
        }
        Err(e) => {
            println!("   ❌ Catalog error: {e}");
            return Err(e.into());
        }
    }

    let mut warnings = Vec::new();
    if config.gateway.host == "0.0.0.0" && config.gateway.cors_origins.is_empty() {
        warnings.push("Gateway bound to 0.0.0.0 while accepting any CORS origin");
    }
    if !config.latency.enabled {
        warnings.push("Latency simulation is off; the front end will not show its thinking state");
    }

    if warnings.is_empty() {
        println!("   ✅ All checks passed");
    } else {
        println!();
        for w in &warnings {
            println!("   ⚠️  {w}");
        }
    }

    println!();
    println!(
        "   Gateway:   {}:{}",
        config.gateway.host, config.gateway.port
    );
    println!(
        "   Catalog:   {}",
        config.catalog.path.as_deref().unwrap_or("built-in")
    );

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
