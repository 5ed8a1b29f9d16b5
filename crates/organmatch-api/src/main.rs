//! OrganMatch HTTP server.

use anyhow::{Context, Result};
use organmatch_api::{AppState, router};
use organmatch_types::{ServiceConfig, constants};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so RUST_LOG and OM_* from it apply
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_json);

    tracing::info!(
        service = constants::SERVICE_NAME,
        version = constants::VERSION,
        listen_addr = %config.listen_addr,
        cascade_policy = %config.cascade_policy,
        "Starting server"
    );

    let state = AppState::new(&config);
    if let Some(username) = &config.admin_username {
        let admin = state
            .gate
            .provision_admin(state.store.as_ref(), username)
            .context("Failed to provision administrator")?;
        tracing::info!(user = %admin.id, username = %admin.username, "Administrator ready");
    }

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    tracing::info!(addr = %config.listen_addr, "Listening");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true),
            )
            .init();
    }
}
