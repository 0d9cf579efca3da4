//! Request handlers. Thin by design: the pipeline lives in fatgen-core, the
//! template in fatgen-pdf; handlers translate between HTTP and those calls.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::error;

use fatgen_core::{pipeline, FatProcedure, TechSpec};
use fatgen_pdf::pdf_filename;

use crate::error::ApiError;
use crate::state::AppState;

/// Fixed user-facing message for rendering failures; internals go to the log.
const PDF_FAILURE_DETAIL: &str = "Failed to generate PDF document.";

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": crate::SERVICE_NAME }))
}

/// `POST /generate`: raw spec text in, compliance-corrected procedure out.
/// Extraction failures surface with their raw message.
pub async fn generate(
    State(state): State<AppState>,
    Json(spec): Json<TechSpec>,
) -> Result<Json<FatProcedure>, ApiError> {
    let procedure =
        pipeline::generate_procedure(state.extractor.as_ref(), &state.rules, &spec.raw_text)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(procedure))
}

/// `POST /generate-pdf`: procedure in, PDF attachment out. Rendering failures
/// surface with a fixed message that does not echo internals.
pub async fn generate_pdf(
    State(state): State<AppState>,
    Json(procedure): Json<FatProcedure>,
) -> Result<Response, ApiError> {
    let bytes = state
        .renderer
        .render(&procedure, Utc::now())
        .map_err(|e| {
            error!(error = %e, device_model = %procedure.device_model, "pdf rendering failed");
            ApiError::internal(PDF_FAILURE_DETAIL)
        })?;

    let disposition = format!(
        "attachment; filename={}",
        pdf_filename(&procedure.device_model)
    );
    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
