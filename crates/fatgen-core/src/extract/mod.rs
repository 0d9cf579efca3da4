//! Structured extraction of FAT procedures from raw specification text.
//!
//! The LLM sits behind [`ExtractionClient`] so callers hold an
//! `Arc<dyn ExtractionClient>` and tests can substitute a fake. Extraction
//! failures are opaque by contract: one `anyhow::Error`, no retries, no
//! partial documents.

mod openai;
mod prompt;

pub use openai::{ExtractorConfig, OpenAiExtractor};

use async_trait::async_trait;

use crate::model::FatProcedure;

/// A capability that turns raw spec text into a schema-conformant procedure.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Extracts a structured procedure from unstructured spec text.
    ///
    /// The returned document is structurally complete but semantically
    /// unaudited; callers must run the compliance pass before using it.
    async fn extract(&self, spec_text: &str) -> anyhow::Result<FatProcedure>;

    fn provider_name(&self) -> &'static str;
}
