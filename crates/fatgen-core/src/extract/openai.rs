use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::prompt;
use super::ExtractionClient;
use crate::model::FatProcedure;

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Configuration for the OpenAI-backed extractor.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// API base URL. Overridable so tests can point at a local mock server.
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    /// Low by default: extraction wants determinism, not creativity.
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

impl ExtractorConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Extraction client backed by the OpenAI chat completions API with strict
/// structured output. Construct once, share via `Arc<dyn ExtractionClient>`.
pub struct OpenAiExtractor {
    config: ExtractorConfig,
    client: reqwest::Client,
}

impl OpenAiExtractor {
    pub fn new(config: ExtractorConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let config = ExtractorConfig {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            ..config
        };
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ExtractionClient for OpenAiExtractor {
    async fn extract(&self, spec_text: &str) -> anyhow::Result<FatProcedure> {
        let url = format!("{}/chat/completions", self.config.api_base);

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompt::SYSTEM_PROMPT },
                { "role": "user", "content": prompt::user_prompt(spec_text) },
            ],
            "temperature": self.config.temperature,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "fat_procedure",
                    "strict": true,
                    "schema": prompt::response_schema(),
                }
            },
        });

        debug!(url = %url, model = %self.config.model, "requesting structured extraction");

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("extraction API error (status {status}): {error_text}");
        }

        let json: serde_json::Value = resp.json().await?;
        let content = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("extraction API response missing content"))?;

        let procedure: FatProcedure = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("extraction output does not match schema: {e}"))?;

        Ok(procedure)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
