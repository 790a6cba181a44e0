use anyhow::{Context, Result};
use clap::Parser;
use openai_action_gateway::auth::TokenVerifier;
use openai_action_gateway::config::{load_config, load_credentials};
use openai_action_gateway::gateway::{
    ActionDispatcher, GatewayHandler, ProviderClient, ResourceFetcher,
};
use openai_action_gateway::routes::create_router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing()?;

    info!("Starting OpenAI action gateway...");

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration and secrets
    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    let credentials = load_credentials().context("Failed to load credentials")?;

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_addr.clone());

    // Initialize components
    let provider = ProviderClient::new(&config.upstream, credentials.api_key)
        .context("Failed to create provider client")?;
    let fetcher = ResourceFetcher::new(provider.http_client());
    let dispatcher = ActionDispatcher::new(provider, fetcher);
    let verifier = TokenVerifier::new(credentials.auth_secret, config.auth.token_leeway_seconds);
    let handler = Arc::new(GatewayHandler::new(verifier, dispatcher));

    // Create router with middleware
    let app = create_router(
        handler,
        config.server.request_body_limit_bytes,
        Duration::from_millis(config.upstream.request_timeout_ms),
    );

    // Start server
    info!("Server starting on {}", bind_addr);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!("Action gateway running at http://{}/", bind_addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_duration()))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openai_action_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

async fn shutdown_signal(grace_period: Duration) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }

    // Give the server some time to finish ongoing requests
    if grace_period > Duration::ZERO {
        info!(
            "Waiting {}s for ongoing requests to complete...",
            grace_period.as_secs()
        );
        tokio::time::sleep(grace_period).await;
    }
}
