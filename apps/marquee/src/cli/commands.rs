//! # CLI Command Implementations

use crate::api;
use crate::config::ServerConfig;
use marquee_core::{Catalog, CatalogError};

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server with an empty catalog. CLI flags win over config.
pub async fn cmd_serve(
    mut config: ServerConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), CatalogError> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config.validate()?;

    println!("Marquee Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:          {}", config.host);
    println!("  Port:          {}", config.port);
    println!("  Popular count: {}", config.popular_default_count);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&config, Catalog::new()).await
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Print the effective configuration.
pub fn cmd_config(config: &ServerConfig) -> Result<(), CatalogError> {
    let output = serde_json::to_string_pretty(config)
        .map_err(|e| CatalogError::Config(format!("Cannot render config: {}", e)))?;
    println!("{}", output);
    Ok(())
}
