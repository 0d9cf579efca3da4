//! Instruction policy and output schema handed to the model.

use serde_json::{json, Value};

/// System prompt encoding the extraction policy. The model is told to be
/// specific, to disclose hazards, and never to invent numbers; the compliance
/// pass downstream assumes nothing of the sort actually happened.
pub(crate) const SYSTEM_PROMPT: &str = "\
You are a senior QA engineer for industrial sensing equipment. You read \
technical specifications and produce a rigorous Factory Acceptance Test (FAT) \
procedure.

Rules:
1. Be specific. Not \"Check the sensor\" but \"Verify sensor output is within \
0.5% accuracy\".
2. Mark steps involving high voltage, lasers, or extreme heat as safety \
critical.
3. Follow the output schema exactly.
4. Use only numeric values present in the input text. Never invent numbers.";

pub(crate) fn user_prompt(spec_text: &str) -> String {
    format!("Create a FAT procedure for this specification:\n\n{spec_text}")
}

/// JSON Schema for the structured-output response format. Kept in lockstep
/// with `model::FatProcedure`; a drift here surfaces as a deserialize error.
pub(crate) fn response_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["project_name", "device_model", "standard_reference", "steps"],
        "properties": {
            "project_name": {
                "type": "string",
                "description": "Project or customer name from context, or 'Generic' if unknown."
            },
            "device_model": {
                "type": "string",
                "description": "The specific device model under test."
            },
            "standard_reference": {
                "type": ["string", "null"],
                "description": "ISO or IEC standards mentioned in the text, if any."
            },
            "steps": {
                "type": "array",
                "description": "Chronological test steps extracted from the spec.",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["step_id", "instruction", "expected_result", "safety_critical"],
                    "properties": {
                        "step_id": {
                            "type": "string",
                            "description": "Sequential dotted ID, e.g. '1.1'."
                        },
                        "instruction": {
                            "type": "string",
                            "description": "Imperative action for the technician."
                        },
                        "expected_result": {
                            "type": "string",
                            "description": "Precise observable outcome."
                        },
                        "safety_critical": {
                            "type": "boolean",
                            "description": "True if the step involves high voltage, heat, or lasers."
                        }
                    }
                }
            }
        }
    })
}
