//! # Marquee - Film Catalog Server
//!
//! The main binary for the Marquee catalog.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface with layered configuration
//!
//! Catalog logic lives in `marquee-core`; this binary only adds transport,
//! configuration and logging.
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! marquee serve --host 0.0.0.0 --port 8080
//!
//! # Show the effective configuration
//! marquee --config marquee.toml config
//! ```

use clap::Parser;
use marquee::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // MARQUEE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MARQUEE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "marquee=debug,marquee_core=debug,tower_http=debug"
    } else {
        "marquee=info,marquee_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_banner() {
    println!(
        r#"
  ███╗   ███╗ █████╗ ██████╗  ██████╗ ██╗   ██╗███████╗███████╗
  ████╗ ████║██╔══██╗██╔══██╗██╔═══██╗██║   ██║██╔════╝██╔════╝
  ██╔████╔██║███████║██████╔╝██║   ██║██║   ██║█████╗  █████╗
  ██║╚██╔╝██║██╔══██║██╔══██╗██║▄▄ ██║██║   ██║██╔══╝  ██╔══╝
  ██║ ╚═╝ ██║██║  ██║██║  ██║╚██████╔╝╚██████╔╝███████╗███████╗
  ╚═╝     ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝ ╚══▀▀═╝  ╚═════╝ ╚══════╝╚══════╝

  Film Catalog Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
