use actix_web::{web, HttpServer};
use anyhow::Context;

use tg_api::{create_app, telemetry, AppState};
use tg_core::services::VerificationServiceConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env and layered configuration
    let config = tg_infra::load_config().context("failed to load configuration")?;

    telemetry::init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        "Starting Tokengate API Server"
    );

    let infra = tg_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;

    let app_state = web::Data::new(AppState::new(
        infra,
        VerificationServiceConfig::from(&config.verification),
    ));

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}
