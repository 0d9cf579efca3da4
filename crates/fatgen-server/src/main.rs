use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fatgen_core::{ComplianceRules, OpenAiExtractor};
use fatgen_pdf::PdfRenderer;
use fatgen_server::config::ServerConfig;
use fatgen_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let cors = config.cors_layer()?;

    let extractor = OpenAiExtractor::new(config.extractor_config())?;
    let state = AppState::new(
        Arc::new(extractor),
        Arc::new(PdfRenderer),
        ComplianceRules::high_voltage(),
    );

    let app = fatgen_server::router(state, cors);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!(bind = %config.bind, model = %config.model, "fatgen server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
