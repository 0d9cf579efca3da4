//! Wire-level data model shared by the extractor, validator, renderer, and API.
//!
//! Field names are the JSON contract consumed by clients; renaming any of them
//! is a breaking change.

use serde::{Deserialize, Serialize};

/// Raw technical specification text. No structure is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechSpec {
    pub raw_text: String,
}

/// A single atomic step in a Factory Acceptance Test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    /// Sequential dotted identifier, e.g. "1.1". Uniqueness is expected from
    /// the extractor but not enforced here.
    pub step_id: String,
    /// Imperative action for the technician. The compliance pass may append
    /// an auto-flag marker to this text.
    pub instruction: String,
    /// Observable pass criterion. Replaced by the compliance pass when empty
    /// or a placeholder.
    pub expected_result: String,
    /// True if the step involves high voltage, extreme heat, lasers, or other
    /// hazards. The compliance pass may flip this false -> true, never back.
    #[serde(default)]
    pub safety_critical: bool,
}

/// The complete structured FAT document. Built fresh per request, corrected in
/// place by the compliance pass, optionally rendered to PDF, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatProcedure {
    pub project_name: String,
    pub device_model: String,
    /// ISO/IEC standards mentioned in the source text, if any.
    pub standard_reference: Option<String>,
    /// Execution order is meaningful.
    pub steps: Vec<TestStep>,
}
