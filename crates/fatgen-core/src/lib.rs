//! Core pipeline for AI-assisted Factory Acceptance Test generation.
//!
//! The crate is split along the two halves of the pipeline:
//!
//! 1. **Extraction** (`extract`) — turns raw specification text into a
//!    structured [`FatProcedure`] via an LLM behind the [`ExtractionClient`]
//!    trait. The model is strictly a translator; it never gets the last word.
//! 2. **Compliance** (`compliance`) — a deterministic rule pass that corrects
//!    what the model missed: undisclosed high-voltage hazards and unusable
//!    expected results. This pass is the authority on the final document.
//!
//! [`pipeline::generate_procedure`] composes the two.

pub mod compliance;
pub mod extract;
pub mod model;
pub mod pipeline;

pub use compliance::ComplianceRules;
pub use extract::{ExtractionClient, ExtractorConfig, OpenAiExtractor};
pub use model::{FatProcedure, TechSpec, TestStep};
