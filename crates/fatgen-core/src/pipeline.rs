//! The one composition point: extract, then run the compliance pass.

use tracing::debug;

use crate::compliance::ComplianceRules;
use crate::extract::ExtractionClient;
use crate::model::FatProcedure;

/// Generates a compliance-corrected procedure from raw spec text.
///
/// Extraction failures propagate opaquely; the compliance pass itself cannot
/// fail. The returned document is ready for rendering or the wire.
pub async fn generate_procedure(
    client: &dyn ExtractionClient,
    rules: &ComplianceRules,
    raw_text: &str,
) -> anyhow::Result<FatProcedure> {
    let procedure = client.extract(raw_text).await?;
    debug!(
        provider = client.provider_name(),
        steps = procedure.steps.len(),
        device_model = %procedure.device_model,
        "extraction complete, running compliance pass"
    );
    Ok(rules.validate(procedure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestStep;
    use async_trait::async_trait;

    struct FakeClient {
        result: Result<FatProcedure, String>,
    }

    #[async_trait]
    impl ExtractionClient for FakeClient {
        async fn extract(&self, _spec_text: &str) -> anyhow::Result<FatProcedure> {
            self.result
                .clone()
                .map_err(|msg| anyhow::anyhow!("{msg}"))
        }

        fn provider_name(&self) -> &'static str {
            "fake"
        }
    }

    #[tokio::test]
    async fn pipeline_applies_compliance_pass_to_extraction_output() {
        let client = FakeClient {
            result: Ok(FatProcedure {
                project_name: "Pipeline Test".into(),
                device_model: "PT-1".into(),
                standard_reference: None,
                steps: vec![TestStep {
                    step_id: "1.1".into(),
                    instruction: "Apply 230V to the input stage".into(),
                    expected_result: "n/a".into(),
                    safety_critical: false,
                }],
            }),
        };
        let rules = ComplianceRules::high_voltage();

        let out = generate_procedure(&client, &rules, "spec text")
            .await
            .unwrap();

        let step = &out.steps[0];
        assert!(step.safety_critical);
        assert!(step.instruction.ends_with("[AUTO-FLAGGED: SAFETY CRITICAL]"));
        assert_eq!(
            step.expected_result,
            crate::compliance::MANUAL_VERIFY_PLACEHOLDER
        );
    }

    #[tokio::test]
    async fn extraction_failure_propagates_unchanged() {
        let client = FakeClient {
            result: Err("quota exceeded".into()),
        };
        let rules = ComplianceRules::high_voltage();

        let err = generate_procedure(&client, &rules, "spec text")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
