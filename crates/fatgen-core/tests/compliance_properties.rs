//! Contract tests for the compliance pass: idempotence, monotonicity, trigger
//! coverage, and the reference end-to-end scenarios.

use fatgen_core::compliance::{AUTO_FLAG_MARKER, MANUAL_VERIFY_PLACEHOLDER};
use fatgen_core::{ComplianceRules, FatProcedure, TestStep};

fn step(id: &str, instruction: &str, expected_result: &str, safety_critical: bool) -> TestStep {
    TestStep {
        step_id: id.into(),
        instruction: instruction.into(),
        expected_result: expected_result.into(),
        safety_critical,
    }
}

fn procedure(steps: Vec<TestStep>) -> FatProcedure {
    FatProcedure {
        project_name: "Contract".into(),
        device_model: "CT-100".into(),
        standard_reference: Some("IEC 61010-1".into()),
        steps,
    }
}

/// A messy procedure exercising both rules and their non-trigger paths.
fn mixed_procedure() -> FatProcedure {
    procedure(vec![
        step("1.1", "Apply 230V VAC to terminal block", "LED on", false),
        step("1.2", "Check display", "N/A", false),
        step("1.3", "Feed 110 v into the relay", "", false),
        step("1.4", "Apply 24V DC power", "Output reads 4-20mA", false),
        step("1.5", "Connect mains 220V", "Breaker holds", true),
    ])
}

#[test]
fn validate_is_idempotent() {
    let rules = ComplianceRules::high_voltage();
    let once = rules.validate(mixed_procedure());
    let twice = rules.validate(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn safety_flag_is_monotonic() {
    let rules = ComplianceRules::high_voltage();
    let input = mixed_procedure();
    let flagged_before: Vec<bool> = input.steps.iter().map(|s| s.safety_critical).collect();
    let out = rules.validate(input);
    for (before, after) in flagged_before.iter().zip(out.steps.iter()) {
        if *before {
            assert!(after.safety_critical, "flag was dropped on {}", after.step_id);
        }
    }
}

#[test]
fn every_trigger_spelling_flags_exactly_once() {
    let rules = ComplianceRules::high_voltage();
    for text in [
        "Connect 230V supply",
        "Connect 220 V supply",
        "Connect 110V supply",
        "Connect the vac line",
        "Connect the VAC line",
    ] {
        let out = rules.validate(procedure(vec![step("1.1", text, "ok", false)]));
        let s = &out.steps[0];
        assert!(s.safety_critical, "not flagged: {text}");
        assert_eq!(
            s.instruction.matches(AUTO_FLAG_MARKER.trim_start()).count(),
            1,
            "marker not appended exactly once for: {text}"
        );
    }
}

#[test]
fn scenario_high_voltage_auto_flag() {
    let rules = ComplianceRules::high_voltage();
    let out = rules.validate(procedure(vec![step(
        "2.1",
        "Apply 230V VAC to terminal block",
        "LED on",
        false,
    )]));
    let s = &out.steps[0];
    assert_eq!(
        s.instruction,
        "Apply 230V VAC to terminal block [AUTO-FLAGGED: SAFETY CRITICAL]"
    );
    assert_eq!(s.expected_result, "LED on");
    assert!(s.safety_critical);
}

#[test]
fn scenario_expected_result_backfill() {
    let rules = ComplianceRules::high_voltage();
    let out = rules.validate(procedure(vec![step("2.2", "Check display", "N/A", false)]));
    let s = &out.steps[0];
    assert_eq!(s.instruction, "Check display");
    assert_eq!(s.expected_result, MANUAL_VERIFY_PLACEHOLDER);
    assert!(!s.safety_critical);
}

#[test]
fn unrelated_steps_survive_byte_for_byte() {
    let rules = ComplianceRules::high_voltage();
    let input = procedure(vec![step(
        "3.1",
        "Expose the sensor to 23.0 degrees for one hour",
        "Reading stable within 0.1",
        false,
    )]);
    assert_eq!(rules.validate(input.clone()), input);
}

#[test]
fn over_trigger_policy_accepts_substring_matches() {
    // "230 V" embedded in an unrelated number still trips the rule. Deliberate:
    // missed safety flags are worse than a spurious one.
    let rules = ComplianceRules::high_voltage();
    let out = rules.validate(procedure(vec![step(
        "3.2",
        "Log serial 41230 Variant B",
        "ok",
        false,
    )]));
    assert!(out.steps[0].safety_critical);
}

#[test]
fn zero_step_procedure_passes_through() {
    let rules = ComplianceRules::high_voltage();
    let input = procedure(vec![]);
    assert_eq!(rules.validate(input.clone()), input);
}
