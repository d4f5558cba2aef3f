use std::sync::Arc;

use server::{config::HubConfig, error::ServerError, hub::Hub, routes};
use tracing_subscriber::{EnvFilter, prelude::*};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Load environment variables from `.env` if present
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},intents={level},handlers={level},rhasspy_client={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string)
        .map_err(|e| anyhow::anyhow!("Failed to create tracing filter: {}", e))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let config = HubConfig::load()?;
    tracing::info!("Using Rhasspy at {}", config.rhasspy_api_url);

    let Hub {
        state,
        notifications,
        triggers,
    } = Hub::build(&config);

    // Timers and other async sources speak through the notification center
    tokio::spawn(triggers.run(notifications));

    if config.publish_on_startup {
        if rhasspy_client::try_connect_to_rhasspy(&config.rhasspy_api_url)
            .await
            .is_none()
        {
            tracing::warn!("Publishing anyway; uploads will be reported as failed");
        }

        let updater = Arc::clone(&state.updater);
        match updater.update().await {
            Ok(report) if report.is_success() => tracing::info!("Grammar published and trained"),
            Ok(report) => tracing::warn!(
                "Grammar published with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            ),
            Err(e) => tracing::error!("Grammar not published: {}", e),
        }
    } else {
        tracing::info!("Grammar publishing on startup disabled (set INTENT_HUB_PUBLISH_ON_STARTUP=true to enable)");
    }

    let app_router = routes::router(state);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Intent hub listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app_router).await?;
    Ok(())
}
