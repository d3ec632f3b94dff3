use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};
use medreport::api::{self, AppState};
use medreport::extract::DocumentExtractor;
use medreport::{AppConfig, SymptomModel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();

    let model = SymptomModel::load(&config.model_path)
        .with_context(|| format!("loading symptom model from {}", config.model_path.display()))?;
    info!(
        "Loaded symptom model: {} symptoms, {} conditions",
        model.symptoms().len(),
        model.encoder.len()
    );

    // The service still runs without the external binaries; only the
    // report analyzer endpoint is disabled.
    let extractor = match DocumentExtractor::from_config(&config) {
        Ok(extractor) => Some(Arc::new(extractor)),
        Err(err) => {
            warn!("Report analyzer disabled: {err}");
            None
        }
    };

    let state = AppState::new(Arc::new(model), extractor);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {err}");
    }
}
