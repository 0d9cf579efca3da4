//! Deterministic compliance pass over extracted procedures.
//!
//! Acts as a second pair of eyes on the LLM output. Two rules, applied per
//! step in sequence order:
//!
//! 1. **High-voltage guardrail** — if an instruction lexically mentions mains
//!    voltage and the step is not flagged safety-critical, flip the flag and
//!    mark the instruction text. Matching is substring-level on purpose:
//!    a false positive costs a technician a second look, a false negative
//!    costs more.
//! 2. **Unusable expected result** — empty or "n/a" pass criteria are replaced
//!    with a fixed manual-verification placeholder.
//!
//! The pass never fails and is idempotent: re-running it on its own output
//! changes nothing.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::model::FatProcedure;

/// Marker appended to instructions corrected by the high-voltage rule.
pub const AUTO_FLAG_MARKER: &str = " [AUTO-FLAGGED: SAFETY CRITICAL]";

/// Replacement for expected results the extractor left empty or as "n/a".
pub const MANUAL_VERIFY_PLACEHOLDER: &str = "VERIFY MANUALLY (AI Could not determine)";

/// Mains voltage mentions that must carry a safety-critical flag.
const HIGH_VOLTAGE_PATTERNS: &[(&str, &str)] = &[
    ("230v", r"230\s*V"),
    ("110v", r"110\s*V"),
    ("220v", r"220\s*V"),
    ("vac", r"VAC"),
];

/// A single lexical trigger. The name only exists for logging.
#[derive(Debug, Clone)]
pub struct TriggerRule {
    pub name: String,
    pattern: Regex,
}

impl TriggerRule {
    fn new(name: &str, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    fn matches(&self, instruction: &str) -> bool {
        self.pattern.is_match(instruction)
    }
}

/// The ordered trigger set the compliance pass runs with. Immutable after
/// construction; shared freely across requests.
#[derive(Debug, Clone)]
pub struct ComplianceRules {
    triggers: Vec<TriggerRule>,
}

impl Default for ComplianceRules {
    fn default() -> Self {
        Self::high_voltage()
    }
}

impl ComplianceRules {
    /// The fixed production trigger set: 110/220/230 volt mentions (digits,
    /// optional whitespace, "V") and the token "VAC", all case-insensitive.
    pub fn high_voltage() -> Self {
        // The built-in patterns are known-good; compilation cannot fail.
        Self::from_patterns(HIGH_VOLTAGE_PATTERNS)
            .unwrap_or_else(|e| panic!("built-in trigger pattern failed to compile: {e}"))
    }

    /// Builds a rule set from `(name, regex)` pairs. Adding a trigger is a
    /// data change, not a control-flow change.
    pub fn from_patterns(patterns: &[(&str, &str)]) -> Result<Self, regex::Error> {
        let triggers = patterns
            .iter()
            .map(|(name, pattern)| TriggerRule::new(name, pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { triggers })
    }

    /// Runs the compliance pass. Takes exclusive ownership of the document and
    /// returns the corrected version; never fails, never removes information.
    pub fn validate(&self, mut procedure: FatProcedure) -> FatProcedure {
        for step in &mut procedure.steps {
            // RULE 1: high-voltage guardrail. Only append the marker when the
            // flag is currently false; an already-flagged step is left alone,
            // which is what makes re-running the pass a no-op.
            if !step.safety_critical {
                if let Some(trigger) = self
                    .triggers
                    .iter()
                    .find(|trigger| trigger.matches(&step.instruction))
                {
                    debug!(
                        step_id = %step.step_id,
                        trigger = %trigger.name,
                        "auto-flagging undisclosed high-voltage step"
                    );
                    step.safety_critical = true;
                    step.instruction.push_str(AUTO_FLAG_MARKER);
                }
            }

            // RULE 2: unusable expected result. Raw emptiness check, no
            // trimming: a whitespace-only result is passed through as-is.
            if step.expected_result.is_empty()
                || step.expected_result.eq_ignore_ascii_case("n/a")
            {
                debug!(step_id = %step.step_id, "backfilling unusable expected result");
                step.expected_result = MANUAL_VERIFY_PLACEHOLDER.to_string();
            }
        }
        procedure
    }
}
