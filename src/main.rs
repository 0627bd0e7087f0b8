use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use reviewhub::infrastructure::api::ApiFactory;
use reviewhub::infrastructure::observability::{TracingConfig, init_tracing};
use reviewhub::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let api = ApiFactory::create(&settings.backend, &settings.simulator)
        .context("Failed to build backend API")?;
    let router = create_router(AppState::new(api));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
