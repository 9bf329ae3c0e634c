use bingo_caller::{create_router, AppConfig, AppState, HttpRelayPublisher, RelaySummary};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env before tracing so RUST_LOG can come from it
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bingo_caller=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing .env is fine; the variables may come from the environment
    if let Err(e) = dotenv {
        info!(reason = %e, "No .env file loaded");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        url = %config.relay.endpoint(),
        channel = %config.relay.channel,
        token = "********",
        zone = %config.clock.zone_label(),
        timeout_secs = config.relay.timeout.as_secs(),
        "Relay configured"
    );

    let publisher = match HttpRelayPublisher::new(&config.relay, config.clock) {
        Ok(publisher) => Arc::new(publisher),
        Err(e) => {
            error!(error = %e, "Failed to build relay client");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(publisher, config.clock, RelaySummary::from(&config.relay));
    let registry = app_state.registry.clone();
    let app = create_router(app_state);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(port = config.port, error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };
    info!("Server running on http://localhost:{}", config.port);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await;

    if let Err(e) = served {
        error!(error = %e, "Server error");
    }

    let cancelled = registry.cancel_all().await;
    info!(cancelled = cancelled, "Shut down");
}
