use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use timecard_calculator::{create_router, AppState, ChatCompletionsExtractor, Config, RouterOptions};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "timecard-calculator")]
#[command(about = "Extract and total worked hours from timecard images")]
struct Args {
    /// Config file path (extension optional)
    #[arg(short, long, default_value = "config/timecard-calculator")]
    config: String,

    /// Override the bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Loaded config: {}", cfg.service.name);

    let api_key = cfg.extraction.api_key().unwrap_or_else(|| {
        warn!(
            "{} is not set; extraction requests will be rejected upstream",
            cfg.extraction.api_key_env
        );
        String::new()
    });

    info!("Vision model: {} at {}", cfg.extraction.model, cfg.extraction.base_url);

    let extractor = ChatCompletionsExtractor::from_config(&cfg.extraction, api_key);
    let state = AppState::new(Arc::new(extractor));

    let options = RouterOptions::from_config(&cfg.service.http, cfg.service.static_dir.clone());
    if let Some(dir) = &options.static_dir {
        info!("Serving static files from {}", dir);
    }
    let app = create_router(state, options);

    let bind = args.bind.unwrap_or(cfg.service.http.bind);
    let port = args.port.unwrap_or(cfg.service.http.port);
    let addr = format!("{}:{}", bind, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
