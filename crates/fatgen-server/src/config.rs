//! Deployment configuration, flag-or-environment driven.

use axum::http::HeaderValue;
use clap::Parser;
use tower_http::cors::{AllowOrigin, CorsLayer};

use fatgen_core::ExtractorConfig;

/// fatgen HTTP service: turns sensor specs into FAT procedure documents.
#[derive(Debug, Parser)]
#[command(name = "fatgen-server", version, about)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[arg(long, env = "FATGEN_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,

    /// Credential for the extraction capability. The only secret in play.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Chat model used for structured extraction.
    #[arg(long, env = "FATGEN_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Extraction API base URL; pointed elsewhere only in tests and staging.
    #[arg(long, env = "FATGEN_API_BASE", default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    /// Comma-separated origin allow-list for browser clients.
    #[arg(
        long,
        env = "FATGEN_ALLOWED_ORIGINS",
        default_value = "http://localhost:5173,http://127.0.0.1:5173",
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig::default()
            .with_url(self.api_base.clone())
            .with_api_key(self.openai_api_key.clone())
            .with_model(self.model.clone())
    }

    /// CORS layer from the configured allow-list. Origins that do not parse
    /// as header values are rejected up front rather than silently dropped.
    pub fn cors_layer(&self) -> anyhow::Result<CorsLayer> {
        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("invalid allowed origin {origin:?}: {e}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_credentials(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origins(origins: Vec<String>) -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1:0".into(),
            openai_api_key: "test".into(),
            model: "gpt-4o-mini".into(),
            api_base: "https://api.openai.com/v1".into(),
            allowed_origins: origins,
        }
    }

    #[test]
    fn default_origins_build_a_cors_layer() {
        let config = config_with_origins(vec![
            "http://localhost:5173".into(),
            "http://127.0.0.1:5173".into(),
        ]);
        assert!(config.cors_layer().is_ok());
    }

    #[test]
    fn malformed_origin_is_rejected() {
        let config = config_with_origins(vec!["not a header\nvalue".into()]);
        assert!(config.cors_layer().is_err());
    }

    #[test]
    fn extractor_config_carries_credentials() {
        let config = config_with_origins(vec![]);
        let extractor = config.extractor_config();
        assert_eq!(extractor.api_key, "test");
        assert_eq!(extractor.model, "gpt-4o-mini");
    }
}
